//! Common assertion helpers for test output validation

#![allow(dead_code)]

use predicates::prelude::*;

/// Creates a predicate that checks for the images table header
pub fn has_images_header() -> impl Predicate<str> {
    predicates::str::contains("REPOSITORY")
        .and(predicates::str::contains("TAG"))
        .and(predicates::str::contains("IMAGE ID"))
}

/// Creates a predicate that checks for a table row starting with `repo` and `tag`
pub fn lists_image(repo: &str, tag: &str) -> impl Predicate<str> {
    let (repo, tag) = (repo.to_string(), tag.to_string());
    predicate::function(move |output: &str| {
        output.lines().any(|line| {
            let mut fields = line.split_whitespace();
            fields.next() == Some(repo.as_str()) && fields.next() == Some(tag.as_str())
        })
    })
}

/// Creates a predicate that checks for error output
pub fn has_error(message: &str) -> impl Predicate<str> {
    predicates::str::contains("Error:").and(predicates::str::contains(message.to_string()))
}
