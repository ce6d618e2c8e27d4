// Copyright (C) 2020-2026 Andy Kurnia.

use super::error;
use std::collections::{BTreeSet, HashMap};

// The only thing the engine asks of a word list.
pub trait Dictionary: Send + Sync {
    fn in_dictionary(&self, dictionary_id: &str, word: &str) -> bool;

    // Lets the move search abandon a prefix early. Lists that cannot tell
    // must answer true.
    fn has_prefix(&self, dictionary_id: &str, prefix: &str) -> bool {
        let _ = dictionary_id;
        let _ = prefix;
        true
    }
}

// In-memory word lists keyed by dictionary id. Words are stored lowercase.
#[derive(Default)]
pub struct WordListDictionary {
    lists: HashMap<String, BTreeSet<String>>,
}

impl WordListDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_words<S: AsRef<str>, II: IntoIterator<Item = S>>(
        &mut self,
        dictionary_id: &str,
        words: II,
    ) {
        let list = self.lists.entry(dictionary_id.to_string()).or_default();
        for word in words {
            list.insert(word.as_ref().to_lowercase());
        }
    }

    // One word per line; blank lines are skipped.
    pub fn load_str(&mut self, dictionary_id: &str, text: &str) -> error::Returns<usize> {
        let mut words = Vec::new();
        for (line_num, line) in (1..).zip(text.lines()) {
            let word = line.trim();
            if word.is_empty() {
                continue;
            }
            if !word.chars().all(|c| c.is_ascii_alphabetic()) {
                return_error!(format!(
                    "{}: line {} has invalid word {:?}",
                    dictionary_id, line_num, word
                ));
            }
            words.push(word);
        }
        let count = words.len();
        self.add_words(dictionary_id, words);
        log::info!("loaded {} words into {:?}", count, dictionary_id);
        Ok(count)
    }

    pub fn load_file(&mut self, dictionary_id: &str, path: &str) -> error::Returns<usize> {
        self.load_str(dictionary_id, &std::fs::read_to_string(path)?)
    }

    pub fn len(&self, dictionary_id: &str) -> usize {
        self.lists.get(dictionary_id).map_or(0, |list| list.len())
    }

    pub fn is_empty(&self, dictionary_id: &str) -> bool {
        self.len(dictionary_id) == 0
    }
}

impl Dictionary for WordListDictionary {
    fn in_dictionary(&self, dictionary_id: &str, word: &str) -> bool {
        self.lists
            .get(dictionary_id)
            .is_some_and(|list| list.contains(word))
    }

    fn has_prefix(&self, dictionary_id: &str, prefix: &str) -> bool {
        self.lists.get(dictionary_id).is_some_and(|list| {
            list.range::<str, _>((std::ops::Bound::Included(prefix), std::ops::Bound::Unbounded))
                .next()
                .is_some_and(|word| word.starts_with(prefix))
        })
    }
}
