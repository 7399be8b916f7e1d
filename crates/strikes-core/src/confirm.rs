/// Yes/no prompt used to gate destructive roster operations.
pub trait Confirm {
    fn confirm(&self, prompt: &str) -> bool;
}

impl<F> Confirm for F
where
    F: Fn(&str) -> bool,
{
    fn confirm(&self, prompt: &str) -> bool {
        self(prompt)
    }
}

impl Confirm for bool {
    fn confirm(&self, _prompt: &str) -> bool {
        *self
    }
}

pub const RESET_ALL_PROMPT: &str = "Wil je echt ALLE strikes van IEDEREEN wissen?";
pub const REMOVE_PROMPT: &str = "Weet je zeker dat je deze persoon wilt verwijderen?";
