pub mod poller;
pub mod scenario;

pub use poller::{ConvergenceError, ConvergencePoller, Verdict};
pub use scenario::{ScenarioError, ScenarioReport, ScenarioRunner, TransferScenario};
