//! Client-side narrowing of a fetched list.

use crate::entity::Entity;
use crate::model::Patient;

/// Case-insensitive substring search over an entity's search fields
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchFilter {
    term: String,
    needle: String,
}

impl SearchFilter {
    pub fn new(term: impl Into<String>) -> Self {
        let term = term.into();
        let needle = term.to_lowercase();
        Self { term, needle }
    }

    /// The search text as typed
    pub fn term(&self) -> &str {
        &self.term
    }

    pub fn is_empty(&self) -> bool {
        self.term.is_empty()
    }

    pub fn matches<E: Entity>(&self, row: &E) -> bool {
        if self.needle.is_empty() {
            return true;
        }
        row.search_fields()
            .iter()
            .any(|field| field.to_lowercase().contains(&self.needle))
    }

    /// Message for an empty result under this search
    pub fn empty_message<E: Entity>(&self) -> &'static str {
        E::empty_message(&self.term)
    }
}

/// Secondary exact-match filter, e.g. the patient gender dropdown.
///
/// The value `"all"` lets every row through.
#[derive(Clone, Debug)]
pub struct ExactFilter<E> {
    value: String,
    extract: fn(&E) -> String,
}

pub const ALL: &str = "all";

impl<E> ExactFilter<E> {
    pub fn new(value: impl Into<String>, extract: fn(&E) -> String) -> Self {
        Self {
            value: value.into(),
            extract,
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn matches(&self, row: &E) -> bool {
        self.value.eq_ignore_ascii_case(ALL)
            || (self.extract)(row).eq_ignore_ascii_case(&self.value)
    }
}

impl ExactFilter<Patient> {
    pub fn gender(value: impl Into<String>) -> Self {
        Self::new(value, |p| p.gender.to_string())
    }
}

/// Rows passing the search AND, when given, the exact filter
pub fn apply<'a, E: Entity>(
    rows: &'a [E],
    search: &SearchFilter,
    exact: Option<&ExactFilter<E>>,
) -> Vec<&'a E> {
    rows.iter()
        .filter(|row| search.matches(*row))
        .filter(|row| exact.map_or(true, |f| f.matches(*row)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Gender;

    fn patient(first: &str, last: &str, gender: Gender) -> Patient {
        Patient {
            id: format!("id-{}", first),
            patient_id: "PAT123456001".to_string(),
            first_name: first.to_string(),
            middle_name: None,
            last_name: last.to_string(),
            date_of_birth: "1995-03-02".to_string(),
            gender,
            email: Some(format!("{}@clinic.id", first.to_lowercase())),
            primary_phone: "081234567890".to_string(),
            secondary_phone: None,
            national_id: None,
            marital_status: None,
            preferred_language: None,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let rows = vec![
            patient("Raisa", "Anggiani", Gender::Female),
            patient("Budi", "Santoso", Gender::Male),
        ];
        let hits = apply(&rows, &SearchFilter::new("raisa"), None);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].first_name, "Raisa");

        assert!(apply(&rows, &SearchFilter::new("zzz"), None).is_empty());
        assert_eq!(apply(&rows, &SearchFilter::new("SANTO"), None).len(), 1);
        assert_eq!(apply(&rows, &SearchFilter::new(""), None).len(), 2);
    }

    #[test]
    fn test_search_spans_full_name() {
        let rows = vec![patient("Raisa", "Anggiani", Gender::Female)];
        assert_eq!(apply(&rows, &SearchFilter::new("sa ang"), None).len(), 1);
    }

    #[test]
    fn test_gender_filter_composes_with_search() {
        let rows = vec![
            patient("Raisa", "Anggiani", Gender::Female),
            patient("Rama", "Putra", Gender::Male),
        ];
        let search = SearchFilter::new("ra");
        let female = ExactFilter::gender("female");
        let all = ExactFilter::gender("all");
        assert_eq!(apply(&rows, &search, Some(&female)).len(), 1);
        assert_eq!(apply(&rows, &search, Some(&all)).len(), 2);
        assert!(apply(&rows, &SearchFilter::new("rama"), Some(&female)).is_empty());
    }

    #[test]
    fn test_empty_message() {
        assert_eq!(
            SearchFilter::new("").empty_message::<Patient>(),
            "No patients registered yet."
        );
        assert_eq!(
            SearchFilter::new("q").empty_message::<Patient>(),
            "No patients found matching your search."
        );
    }
}
