//! Typed builder for the metadata service's query-string filters.

use url::form_urlencoded;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    /// `field=value`
    Eq { field: String, value: String },
    /// `field=0&field_0=from&field_1=to&field_operator=between`, bounds inclusive.
    Between {
        field: String,
        from: String,
        to: String,
    },
    /// `time_field=field&epoch=since`: records whose `field` is at or after `since`.
    ChangedSince { time_field: String, epoch: String },
}

impl Filter {
    fn push_pairs(&self, out: &mut Vec<(String, String)>) {
        match self {
            Filter::Eq { field, value } => out.push((field.clone(), value.clone())),
            Filter::Between { field, from, to } => {
                out.push((field.clone(), "0".to_string()));
                out.push((format!("{}_0", field), from.clone()));
                out.push((format!("{}_1", field), to.clone()));
                out.push((format!("{}_operator", field), "between".to_string()));
            }
            Filter::ChangedSince { time_field, epoch } => {
                out.push(("time_field".to_string(), time_field.clone()));
                out.push(("epoch".to_string(), epoch.clone()));
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    filters: Vec<Filter>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn eq(mut self, field: &str, value: impl ToString) -> Self {
        self.filters.push(Filter::Eq {
            field: field.to_string(),
            value: value.to_string(),
        });
        self
    }

    pub fn between(mut self, field: &str, from: impl ToString, to: impl ToString) -> Self {
        self.filters.push(Filter::Between {
            field: field.to_string(),
            from: from.to_string(),
            to: to.to_string(),
        });
        self
    }

    pub fn changed_since(mut self, time_field: &str, epoch: impl ToString) -> Self {
        self.filters.push(Filter::ChangedSince {
            time_field: time_field.to_string(),
            epoch: epoch.to_string(),
        });
        self
    }

    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }

    pub fn pairs(&self) -> Vec<(String, String)> {
        let mut out = Vec::new();
        for f in &self.filters {
            f.push_pairs(&mut out);
        }
        out
    }

    /// Percent-encoded `k=v&k=v` form, as appended to the collection URL.
    pub fn encode(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.pairs())
            .finish()
    }
}
