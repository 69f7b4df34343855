//! The Counters structure stores count values that can be passed to
//! data processing functions as a single variable.

// dependencies
use std::collections::BTreeMap;
use std::collections::HashMap;
use num_format::{Locale, ToFormattedString};

// define a constant to print a separator line when printing counters
pub const COUNTER_SEPARATOR: &str = "------------------------------------------------------------";

/// The Counters struct stores keyed usize count values in a HashMap.
///
/// By convention, Counters objects are named `ctrs`.
pub struct Counters {
    tool:               String,
    // regular counter fields, for things like record tallies
    keys:               Vec<String>,
    descriptions:       HashMap<String, String>,
    counts:             HashMap<String, usize>,
    // keyed counter fields, for things like per-category tallies
    keyed_keys:         Vec<String>,
    keyed_descriptions: HashMap<String, String>,
    keyed_counts:       HashMap<String, BTreeMap<String, usize>>,
}
impl Counters {
    /// Create a new Counters instance with specified "regular" counters keys
    /// initialized to zero.
    ///
    /// Pass requested counters as a slice of tuples of form `&[(&str, &str)]`,
    /// where the first element of each tuple is the counter key and the second
    /// element is the counter description.
    ///
    /// Pass (COUNTER_SEPARATOR, "") to insert a separator line
    /// between groups of related counters.
    ///
    /// By convention, Counters objects are named `ctrs`.
    pub fn new(tool: &str, counters: &[(&str, &str)]) -> Self {
        let mut ctrs = Counters {
            tool:               tool.to_string(),
            keys:               Vec::new(),
            descriptions:       HashMap::new(),
            counts:             HashMap::new(),
            keyed_keys:         Vec::new(),
            keyed_descriptions: HashMap::new(),
            keyed_counts:       HashMap::new(),
        };
        ctrs.add_counters(counters);
        ctrs
    }
    /// Add one or more regular counters to the Counters instance.
    pub fn add_counters(&mut self, counters: &[(&str, &str)]) -> &mut Self {
        for (key, description) in counters {
            if *key == COUNTER_SEPARATOR {
                let n_separators = self.keys.iter().filter(|k| k.starts_with(COUNTER_SEPARATOR)).count();
                let final_key = format!("{}{}", COUNTER_SEPARATOR, n_separators);
                self.descriptions.insert(final_key.clone(), COUNTER_SEPARATOR.to_string());
                self.keys.push(final_key);
            } else {
                self.descriptions.insert(key.to_string(), (*description).to_string());
                self.counts.insert(key.to_string(), 0);
                self.keys.push(key.to_string());
            }
        }
        self
    }
    /// Add one or more keyed counters to the Counters instance.
    pub fn add_keyed_counters(&mut self, counters: &[(&str, &str)]) -> &mut Self {
        for (key, description) in counters {
            self.keyed_keys.push(key.to_string());
            self.keyed_descriptions.insert(key.to_string(), (*description).to_string());
            self.keyed_counts.insert(key.to_string(), BTreeMap::new());
        }
        self
    }
    /* ------------------------------------------------------------------
    regular counter methods
    ------------------------------------------------------------------ */
    /// Increment the count for the specified counter key by one.
    ///
    /// Panic if the key is not found.
    pub fn increment(&mut self, key: &str) {
        self.add_to(key, 1);
    }
    /// Increment the count for the specified counter key an arbitrary amount.
    ///
    /// Panic if the key is not found.
    pub fn add_to(&mut self, key: &str, value: usize) {
        let counter = self.counts.get_mut(key).unwrap_or_else(||
            panic!("Counters::add_to error: key '{}' not found", key)
        );
        *counter += value;
    }
    /// Return the current count for the specified counter key.
    ///
    /// Panic if the key is not found.
    pub fn get(&self, key: &str) -> usize {
        *self.counts.get(key).unwrap_or_else(||
            panic!("Counters::get error: key '{}' not found", key)
        )
    }
    /* ------------------------------------------------------------------
    keyed counter methods, with outer and inner keys
    ------------------------------------------------------------------ */
    /// Increment the count for the specified keyed counter key by one.
    ///
    /// Panic if the outer key is not found.
    pub fn increment_keyed(&mut self, outer_key: &str, inner_key: &str) {
        self.add_to_keyed(outer_key, inner_key, 1);
    }
    /// Increment the count for the specified keyed counter key an arbitrary amount.
    ///
    /// Panic if the outer key is not found.
    pub fn add_to_keyed(&mut self, outer_key: &str, inner_key: &str, value: usize) {
        let keyed_counter = self.keyed_counts.get_mut(outer_key).unwrap_or_else(||
            panic!("Counters::add_to_keyed error: outer key '{}' not found", outer_key)
        );
        *keyed_counter.entry(inner_key.to_string()).or_insert(0) += value;
    }
    /// Return the current count for the specified keyed counter, or 0 if
    /// the inner key has never been counted.
    ///
    /// Panic if the outer key is not found.
    pub fn get_keyed(&self, outer_key: &str, inner_key: &str) -> usize {
        let keyed_counter = self.keyed_counts.get(outer_key).unwrap_or_else(||
            panic!("Counters::get_keyed error: outer key '{}' not found", outer_key)
        );
        keyed_counter.get(inner_key).copied().unwrap_or(0)
    }
    /* ------------------------------------------------------------------
    count reporting
    ------------------------------------------------------------------ */
    /// Return report lines for all counters in the order they were initialized,
    /// regular counters first. Keyed counters report inner keys in sorted order.
    pub fn report(&self) -> Vec<String> {
        let mut lines = Vec::new();
        for key in &self.keys {
            if key.starts_with(COUNTER_SEPARATOR) {
                lines.push(COUNTER_SEPARATOR.to_string());
            } else {
                lines.push(format!("{}\t{}\t{}\t{}",
                    self.tool,
                    self.counts[key].to_formatted_string(&Locale::en),
                    key,
                    self.descriptions[key]
                ));
            }
        }
        for key in &self.keyed_keys {
            for (inner_key, count) in &self.keyed_counts[key] {
                lines.push(format!("{}\t{}\t{}\t{}\t{}",
                    self.tool,
                    count.to_formatted_string(&Locale::en),
                    key,
                    inner_key,
                    self.keyed_descriptions[key]
                ));
            }
        }
        lines
    }
    /// Print the value of all counters with their descriptions
    /// to STDERR in the order they were initialized.
    pub fn print_all(&self) {
        for line in self.report() {
            eprintln!("{}", line);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_formats_counts_with_separators() {
        let mut ctrs = Counters::new("rvec", &[
            ("N_RECORDS", "input records read"),
            (COUNTER_SEPARATOR, ""),
            ("N_GROUPS", "record groups processed"),
        ]);
        ctrs.add_to("N_RECORDS", 1_234_567);
        ctrs.increment("N_GROUPS");
        let lines = ctrs.report();
        assert_eq!(lines, vec![
            "rvec\t1,234,567\tN_RECORDS\tinput records read".to_string(),
            COUNTER_SEPARATOR.to_string(),
            "rvec\t1\tN_GROUPS\trecord groups processed".to_string(),
        ]);
    }

    #[test]
    fn keyed_counters_accumulate() {
        let mut ctrs = Counters::new("rvec", &[]);
        ctrs.add_keyed_counters(&[("N_BY_RESULT", "groups by result kind")]);
        ctrs.increment_keyed("N_BY_RESULT", "NA");
        ctrs.increment_keyed("N_BY_RESULT", "value");
        ctrs.add_to_keyed("N_BY_RESULT", "value", 2);
        assert_eq!(ctrs.get_keyed("N_BY_RESULT", "value"), 3);
        assert_eq!(ctrs.get_keyed("N_BY_RESULT", "missing"), 0);
        assert_eq!(ctrs.report()[0], "rvec\t1\tN_BY_RESULT\tNA\tgroups by result kind");
    }

    #[test]
    #[should_panic(expected = "key 'N_NOPE' not found")]
    fn unknown_key_panics() {
        Counters::new("rvec", &[]).increment("N_NOPE");
    }
}
