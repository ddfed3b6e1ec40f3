//! Small form primitives shared by every screen.

mod button;
pub use button::{Button, ButtonVariant};

mod input;
pub use input::Input;

mod card;
pub use card::{Card, CardContent, CardDescription, CardHeader, CardTitle};
