pub mod care;
pub mod mood;

pub use care::{CareError, ItemOutcome, PetCare, PetStats};
pub use mood::{MoodActor, MoodWatch};
