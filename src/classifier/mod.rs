//! Classification of thread names and filesystem paths.
//!
//! A candidate may belong to zero, one or several categories. Every rule
//! is tested against every candidate; table order only fixes the order of
//! the returned categories.

pub mod rules;

pub use rules::{PathCategory, Rule, ThreadCategory, PATH_RULES, THREAD_RULES};

/// Test `candidate` against every rule of `table`, in table order
pub fn classify<C: Copy>(table: &[Rule<C>], candidate: &str) -> Vec<C> {
    let mut matched = Vec::new();
    for rule in table {
        if rule.matches(candidate) {
            matched.push(rule.category);
        }
    }
    matched
}

/// Categories whose thread-name convention `name` follows
pub fn classify_thread(name: &str) -> Vec<ThreadCategory> {
    classify(THREAD_RULES.as_slice(), name)
}

/// Categories whose path convention `path` follows
pub fn classify_path(path: &str) -> Vec<PathCategory> {
    classify(PATH_RULES.as_slice(), path)
}
