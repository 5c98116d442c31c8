/// HODL baseline and divergence vs the passive benchmark.
pub mod impermanent_loss;
