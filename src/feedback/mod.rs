//! Feedback module - camera shake and shake sound.

mod audio;
mod plugin;
mod shake;

pub use audio::ShakeSound;
pub use plugin::FeedbackPlugin;
pub use shake::{ScreenShake, ShakeCamera};
