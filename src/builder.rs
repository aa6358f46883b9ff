//! Tournament assembly.

use tracing::debug;

use crate::bracket::{opening_round, Draw, SingleElimination};
use crate::config::TournamentConfig;
use crate::error::{Result, ScheduleError};
use crate::models::{Group, MatchArena, Participant, Setting, Team, Tournament};
use crate::validation::validate_tournament;

/// Entrants of one category, as given to the builder.
#[derive(Debug, Clone)]
enum Entrants {
    Teams(Vec<Team>),
    Subscriptions(Vec<Vec<Participant>>),
}

/// Builds a validated [`Tournament`] from settings and category entrants.
///
/// Categories are assembled in the order they were added. For each one the
/// entrants are optionally drawn, paired into an opening round, and
/// completed into a single-elimination bracket.
///
/// # Example
/// ```
/// use court_schedule::TournamentBuilder;
/// use court_schedule::models::{Participant, Setting, TournamentDay};
///
/// let settings = Setting::new(
///     60,
///     30,
///     1,
///     vec![TournamentDay::new("2024-05-04", 9, 20).unwrap()],
/// ).unwrap();
///
/// let tournament = TournamentBuilder::new(settings)
///     .with_subscriptions(
///         "mixed_double",
///         vec![
///             vec![Participant::new(1, "Ann"), Participant::new(2, "Bob")],
///             vec![Participant::new(3, "Cid"), Participant::new(4, "Dee")],
///         ],
///     )
///     .build()
///     .unwrap();
///
/// assert_eq!(tournament.playable_matches().len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct TournamentBuilder {
    settings: Setting,
    categories: Vec<(String, Entrants)>,
    draw_seed: Option<u64>,
}

impl TournamentBuilder {
    /// Starts a tournament with the given settings.
    pub fn new(settings: Setting) -> Self {
        Self {
            settings,
            categories: Vec::new(),
            draw_seed: None,
        }
    }

    /// Starts a tournament from loaded configuration, taking its settings
    /// and draw seed.
    pub fn from_config(config: &TournamentConfig) -> Self {
        Self {
            settings: config.settings.clone(),
            categories: Vec::new(),
            draw_seed: config.solver.draw_seed,
        }
    }

    /// Adds a category with ready-made teams.
    pub fn with_category(mut self, category: impl Into<String>, teams: Vec<Team>) -> Self {
        self.categories
            .push((category.into(), Entrants::Teams(teams)));
        self
    }

    /// Adds a category from participant lists; each list of one or two
    /// participants becomes a team.
    pub fn with_subscriptions(
        mut self,
        category: impl Into<String>,
        subscriptions: Vec<Vec<Participant>>,
    ) -> Self {
        self.categories
            .push((category.into(), Entrants::Subscriptions(subscriptions)));
        self
    }

    /// Shuffles every category's entrants with a seeded draw before pairing.
    pub fn with_draw_seed(mut self, seed: u64) -> Self {
        self.draw_seed = Some(seed);
        self
    }

    /// Assembles and validates the tournament.
    ///
    /// # Errors
    /// - [`ScheduleError::InvalidSetting`] for unusable settings
    /// - [`ScheduleError::InvalidTeamSize`] for a subscription of the wrong size
    /// - [`ScheduleError::Validation`] when the result fails
    ///   [`validate_tournament`]
    pub fn build(self) -> Result<Tournament> {
        self.settings.validate()?;

        let mut draw = self.draw_seed.map(Draw::seeded);
        let mut arena = MatchArena::new();
        let mut groups = Vec::with_capacity(self.categories.len());

        for (category, entrants) in self.categories {
            let mut teams = match entrants {
                Entrants::Teams(teams) => teams,
                Entrants::Subscriptions(subscriptions) => subscriptions
                    .into_iter()
                    .map(|players| Team::new(category.as_str(), players))
                    .collect::<Result<Vec<_>>>()?,
            };
            if let Some(draw) = draw.as_mut() {
                draw.shuffle(&mut teams);
            }

            let initial = opening_round(&mut arena, &category, &teams);
            let future = SingleElimination::new(category.as_str(), initial.clone())
                .generate(&mut arena);
            debug!(
                event = "category_built",
                category = %category,
                teams = teams.len(),
                opening = initial.len(),
                generated = future.len(),
            );
            groups.push(Group::new(category, teams, initial, future));
        }

        let tournament = Tournament::new(self.settings, groups, arena);
        validate_tournament(&tournament).map_err(ScheduleError::Validation)?;

        debug!(
            event = "tournament_built",
            categories = tournament.groups().len(),
            matches = tournament.arena().len(),
            playable = tournament.playable_matches().len(),
            draw_seed = self.draw_seed,
        );
        Ok(tournament)
    }
}
