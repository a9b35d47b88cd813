pub mod classifier;
pub mod config;
pub mod dispatch;
pub mod drivers;
pub mod gestures;
pub mod recorder;
pub use classifier::{CentroidClassifier, Classifier};
pub use config::AppConfig;
pub use dispatch::ClassificationDispatch;
pub use gestures::{GestureLabel, KNOWN_GESTURES};
