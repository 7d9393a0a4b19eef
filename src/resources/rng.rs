use bevy_ecs::prelude::Resource;
use fastrand::Rng;

/// Shared random source for drift, placement and caption picks.
///
/// Seeded from [`ParadiseConfig::seed`](crate::resources::paradiseconfig::ParadiseConfig)
/// when set, so a whole run can be replayed.
#[derive(Resource)]
pub struct ParadiseRng(pub Rng);

impl ParadiseRng {
    pub fn new(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => ParadiseRng(Rng::with_seed(seed)),
            None => ParadiseRng(Rng::new()),
        }
    }
}

impl Default for ParadiseRng {
    fn default() -> Self {
        Self::new(None)
    }
}
