//! Notification copy

/// Title of posture alerts
pub const POSTURE_TITLE: &str = "Posture Monitor - Posture Alert";

/// Title of plain break reminders
pub const BREAK_TITLE: &str = "Posture Monitor - Break Time";

/// Bodies for posture alerts
pub const POSTURE_MESSAGES: [&str; 10] = [
    "Quack! Straighten up! Slouching isn't stylish!",
    "Quack, quack! Good posture makes you look as elegant as a swan!",
    "If I had a spine, I'd keep it straight! Quack, you should too!",
    "Waddle you doing? Quack up that posture!",
    "Quack alert! Your posture needs a little lift!",
    "Ducks don't slouch—quack yourself into a better position!",
    "Quack, quack! Back straight, shoulders back—just like a fancy duck!",
    "No slouching, only quacking! Sit up tall!",
    "Your spine called… quack, it wants better posture!",
    "Quack correction! Fix that posture before I start flapping!",
];

/// Bodies for break reminders
pub const BREAK_MESSAGES: [&str; 10] = [
    "Quack! Time for a quick break—step away and relax!",
    "Quack quack! Your duck buddy says: Take a short break!",
    "Even ducks take breaks! Quack! Rest your eyes and stretch!",
    "Quack alert! Pause for a moment, breathe, and recharge!",
    "Ducks float, you should too! Quack! Take a break!",
    "Step away, stretch, and quack back later!",
    "Quack! A tiny break now means more energy later!",
    "Quack reminder: Rest your eyes, move around, and come back refreshed!",
    "Ducks love naps! Quack! A short break won't hurt!",
    "Time to quack out for a bit! Relax and refresh!",
];

/// Title of break reminders that carry the configured interval
pub fn break_title_with_interval(interval_minutes: u64) -> String {
    format!("Posture Monitor - {}min Break", interval_minutes)
}
