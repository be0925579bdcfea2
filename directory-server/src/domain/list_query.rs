use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use validator::Validate;

pub(crate) const DEFAULT_PAGE: u64 = 1;

/// Field-keyed validation messages, serialized as `{"field": ["message", ...]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub(crate) struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub(crate) fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[cfg(test)]
    pub(crate) fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    fn merge(&mut self, errors: validator::ValidationErrors) {
        for (field, field_errors) in errors.field_errors() {
            for err in field_errors.iter() {
                let message = err
                    .message
                    .as_ref()
                    .map(|message| message.to_string())
                    .unwrap_or_else(|| err.code.to_string());
                self.add(field.to_string(), message);
            }
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, messages) in &self.0 {
            for message in messages {
                if !first {
                    f.write_str("; ")?;
                }
                write!(f, "{field}: {message}")?;
                first = false;
            }
        }
        Ok(())
    }
}

/// List parameters as they arrive in the query string, before any checks.
#[derive(Debug, Clone, Default)]
pub(crate) struct ListQueryInput {
    pub(crate) page: Option<String>,
    pub(crate) limit: Option<String>,
    pub(crate) search: Option<String>,
}

/// Validated listing request. Built once per request and passed by value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ListQuery {
    pub(crate) page: u64,
    pub(crate) limit: u64,
    pub(crate) search: Option<String>,
}

#[derive(Debug, Validate)]
struct IntegerBounds {
    #[validate(range(min = 1, message = "The page field must be at least 1."))]
    page: Option<i64>,
    #[validate(range(min = 1, message = "The limit field must be at least 1."))]
    limit: Option<i64>,
}

impl ListQueryInput {
    /// Checks the raw parameters and the `limit <= total_users` rule.
    ///
    /// `total_users` is the live user count read right before validation.
    pub(crate) fn validate(
        self,
        default_limit: u64,
        total_users: i64,
    ) -> Result<ListQuery, FieldErrors> {
        let mut errors = FieldErrors::default();

        let page = normalize(self.page).and_then(|raw| parse_integer("page", &raw, &mut errors));
        let limit = match normalize(self.limit) {
            Some(raw) => parse_integer("limit", &raw, &mut errors),
            None => Some(i64::try_from(default_limit).unwrap_or(i64::MAX)),
        };
        let search = normalize(self.search);

        if let Err(bounds_errors) = (IntegerBounds { page, limit }).validate() {
            errors.merge(bounds_errors);
        }

        if let Some(limit) = limit
            && limit > total_users
        {
            errors.add(
                "limit",
                format!(
                    "Users per page cannot be greater than total number of users ({total_users})."
                ),
            );
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(ListQuery {
            page: page.map_or(DEFAULT_PAGE, |page| page as u64),
            limit: limit.map_or(default_limit, |limit| limit as u64),
            search,
        })
    }
}

fn normalize(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn parse_integer(field: &'static str, raw: &str, errors: &mut FieldErrors) -> Option<i64> {
    match raw.parse::<i64>() {
        Ok(value) => Some(value),
        Err(_) => {
            errors.add(field, format!("The {field} field must be an integer."));
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{FieldErrors, ListQuery, ListQueryInput};

    fn input(page: Option<&str>, limit: Option<&str>, search: Option<&str>) -> ListQueryInput {
        ListQueryInput {
            page: page.map(str::to_string),
            limit: limit.map(str::to_string),
            search: search.map(str::to_string),
        }
    }

    fn messages(errors: &FieldErrors, field: &str) -> Vec<String> {
        errors.get(field).map(<[String]>::to_vec).unwrap_or_default()
    }

    #[test]
    fn defaults_apply_when_parameters_are_missing() {
        let query = input(None, None, None)
            .validate(10, 50)
            .expect("defaults must be valid");

        assert_eq!(
            query,
            ListQuery {
                page: 1,
                limit: 10,
                search: None,
            }
        );
    }

    #[test]
    fn empty_values_are_treated_as_missing() {
        let query = input(Some(""), Some("  "), Some("   "))
            .validate(10, 50)
            .expect("blank values must fall back to defaults");

        assert_eq!(query.page, 1);
        assert_eq!(query.limit, 10);
        assert_eq!(query.search, None);
    }

    #[test]
    fn search_is_trimmed() {
        let query = input(Some("2"), Some("5"), Some("  ann "))
            .validate(10, 50)
            .expect("must be valid");

        assert_eq!(query.page, 2);
        assert_eq!(query.limit, 5);
        assert_eq!(query.search.as_deref(), Some("ann"));
    }

    #[test]
    fn non_integer_page_and_limit_are_rejected() {
        let errors = input(Some("two"), Some("1.5"), None)
            .validate(10, 50)
            .expect_err("must be rejected");

        assert_eq!(
            messages(&errors, "page"),
            vec!["The page field must be an integer.".to_string()]
        );
        assert_eq!(
            messages(&errors, "limit"),
            vec!["The limit field must be an integer.".to_string()]
        );
    }

    #[test]
    fn values_below_one_are_rejected() {
        let errors = input(Some("0"), Some("-3"), None)
            .validate(10, 50)
            .expect_err("must be rejected");

        assert_eq!(
            messages(&errors, "page"),
            vec!["The page field must be at least 1.".to_string()]
        );
        assert_eq!(
            messages(&errors, "limit"),
            vec!["The limit field must be at least 1.".to_string()]
        );
    }

    #[test]
    fn limit_above_total_names_the_current_total() {
        let errors = input(None, Some("25"), None)
            .validate(10, 12)
            .expect_err("limit must not exceed total");

        assert_eq!(
            messages(&errors, "limit"),
            vec!["Users per page cannot be greater than total number of users (12).".to_string()]
        );
        assert!(errors.get("page").is_none());
    }

    #[test]
    fn default_limit_is_checked_against_total() {
        let errors = input(None, None, None)
            .validate(10, 3)
            .expect_err("defaulted limit exceeds total");

        assert_eq!(
            messages(&errors, "limit"),
            vec!["Users per page cannot be greater than total number of users (3).".to_string()]
        );
    }

    #[test]
    fn limit_equal_to_total_is_allowed() {
        let query = input(None, Some("12"), None)
            .validate(10, 12)
            .expect("limit == total is allowed");
        assert_eq!(query.limit, 12);
    }

    #[test]
    fn field_errors_display_lists_every_message() {
        let mut errors = FieldErrors::default();
        errors.add("limit", "too big");
        errors.add("page", "not a number");

        assert_eq!(errors.to_string(), "limit: too big; page: not a number");
    }

    #[test]
    fn field_errors_serialize_as_plain_map() {
        let mut errors = FieldErrors::default();
        errors.add("limit", "too big");

        let json = serde_json::to_value(&errors).expect("must serialize");
        assert_eq!(json, serde_json::json!({ "limit": ["too big"] }));
    }
}
