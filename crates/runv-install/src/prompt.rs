/// Interactive yes/no question. Anything but an affirmative answer is "no".
pub trait Confirm {
    fn confirm(&self, prompt: &str) -> bool;
}

impl<F> Confirm for F
where
    F: Fn(&str) -> bool,
{
    fn confirm(&self, prompt: &str) -> bool { self(prompt) }
}
