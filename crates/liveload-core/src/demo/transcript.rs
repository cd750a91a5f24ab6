use std::sync::{Arc, Mutex, PoisonError};

/// Ordered output lines shared between scenarios and module bodies
///
/// Module bodies print into the same transcript as the scenario driving
/// them, so side effects of initialization interleave with the caller's
/// own lines in execution order.
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    lines: Arc<Mutex<Vec<String>>>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, line: impl Into<String>) {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(line.into());
    }

    /// Remove and return all lines written so far
    pub fn take(&self) -> Vec<String> {
        std::mem::take(&mut *self.lines.lock().unwrap_or_else(PoisonError::into_inner))
    }

    pub fn len(&self) -> usize {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_take_drains() {
        let transcript = Transcript::new();
        let alias = transcript.clone();

        transcript.push("a");
        alias.push("b");

        assert_eq!(transcript.take(), vec!["a", "b"]);
        assert!(alias.is_empty());
    }
}
