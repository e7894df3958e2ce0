// ABOUTME: Filter query typed into the interactive list after pressing `/`
// ABOUTME: Tracks whether filter mode is active and the text entered so far

#[derive(Clone, Debug, Default)]
pub struct SearchInput {
    pub query: String,
    pub is_active: bool,
}

impl SearchInput {
    pub fn activate(&mut self) {
        self.is_active = true;
    }

    pub fn handle_input(&mut self, c: char) {
        self.query.push(c);
    }

    pub fn handle_backspace(&mut self) {
        self.query.pop();
    }

    /// Leaves filter mode and drops the query.
    pub fn clear(&mut self) {
        self.query.clear();
        self.is_active = false;
    }

    pub fn is_filtering(&self) -> bool {
        self.is_active || !self.query.is_empty()
    }
}
