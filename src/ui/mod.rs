// ABOUTME: Selection prompts for choosing a group or a machine from a list of names
// ABOUTME: Offers a full-screen interactive list and a plain numbered prompt behind one trait

pub mod choice_list;
pub mod interactive;
pub mod numbered;
pub mod search_input;

pub use choice_list::{ChoiceList, KeyOutcome};
pub use interactive::InteractivePicker;
pub use numbered::NumberedPicker;
pub use search_input::SearchInput;

use crate::error::WandError;

#[cfg(test)]
use mockall::automock;

/// A modal prompt that picks one entry out of `options`.
///
/// Returns `Ok(None)` when the user cancels; that is not an error.
#[cfg_attr(test, automock)]
pub trait Picker {
    fn pick(&mut self, title: &str, options: &[String]) -> Result<Option<usize>, WandError>;
}

/// Chooses the prompt flavour: numbered when asked for, or when stdin is not a terminal.
pub fn picker_for(numbered: bool) -> Box<dyn Picker> {
    use std::io::IsTerminal;

    if numbered || !std::io::stdin().is_terminal() {
        tracing::debug!("Using numbered selection prompt");
        Box::new(NumberedPicker::stdio())
    } else {
        Box::new(InteractivePicker::new())
    }
}
