use std::path::Path;

use scriptor_common::{info, success};
use scriptor_core::names::NameClassifier;

use crate::terminal::print;

pub fn syllabify(namefile: &Path, filter: Vec<String>) -> anyhow::Result<()> {
    let classifier = NameClassifier::new(namefile, filter)?;

    if !classifier.filter().is_empty() {
        info!("Ignoring statuses: {}", classifier.filter().join(", "));
    }

    let key_width: usize = classifier.syllables().keys().map(String::len).max().unwrap_or(0);
    for (name, syllables) in classifier.syllables() {
        print::aligned_line(name, key_width, &syllables.join("-"));
    }

    success!("{} names syllabified", classifier.syllables().len());
    Ok(())
}
