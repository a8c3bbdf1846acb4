//! Headless form controller.
//!
//! A [`Form`] ties a namespace and a schema to a bound submission source. It
//! keeps the latest validation result, merges it with custom issues and hands
//! out field and issue chains over the merged list.
//!
//! Change events are ignored until the first submit attempt, after which
//! every change revalidates. A failed submit reports
//! [`EventOutcome::Prevented`].

use form_path::Limits;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::FormError;
use crate::fields::FieldChain;
use crate::issues::{Issue, IssueChain};
use crate::reconstruct::Reconstructor;
use crate::schema::{SafeParse, Schema};
use crate::value::{FlatEntry, FormValue};

/// Namespace used when [`FormOptions::namespace`] is unset.
pub const DEFAULT_NAMESPACE: &str = "form";

/// Where a bound form reads its current entries from.
pub trait SubmissionSource {
    fn entries(&self) -> Vec<FlatEntry>;
}

impl<F> SubmissionSource for F
where
    F: Fn() -> Vec<FlatEntry>,
{
    fn entries(&self) -> Vec<FlatEntry> {
        self()
    }
}

impl SubmissionSource for Vec<FlatEntry> {
    fn entries(&self) -> Vec<FlatEntry> {
        self.clone()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormOptions {
    pub namespace: Option<String>,
    /// Validate on blur even before the first submit.
    pub validate_on_blur: bool,
    /// Validate on change even before the first submit.
    pub validate_on_change: bool,
    pub limits: Limits,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormEvent {
    Change,
    Blur,
    Submit,
    /// The host rejected the submission on its own constraints.
    Invalid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventOutcome {
    Ignored,
    Validated,
    /// Submission must not proceed.
    Prevented,
    Submitted,
}

pub struct Form<S: Schema> {
    namespace: String,
    schema: S,
    options: FormOptions,
    source: Option<Box<dyn SubmissionSource>>,
    validation: Option<SafeParse<S::Output>>,
    custom_issues: Vec<Issue>,
    issues: Vec<Issue>,
    submitted_once: bool,
}

impl<S: Schema> Form<S> {
    pub fn new(namespace: impl Into<String>, schema: S) -> Self {
        Self::with_options(
            schema,
            FormOptions {
                namespace: Some(namespace.into()),
                ..FormOptions::default()
            },
        )
    }

    pub fn with_options(schema: S, options: FormOptions) -> Self {
        let namespace = options
            .namespace
            .clone()
            .unwrap_or_else(|| DEFAULT_NAMESPACE.to_string());
        Self {
            namespace,
            schema,
            options,
            source: None,
            validation: None,
            custom_issues: Vec::new(),
            issues: Vec::new(),
            submitted_once: false,
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn schema(&self) -> &S {
        &self.schema
    }

    pub fn options(&self) -> &FormOptions {
        &self.options
    }

    /// Replaces any previous binding.
    pub fn bind(&mut self, source: impl SubmissionSource + 'static) {
        debug!(namespace = %self.namespace, "form bound");
        self.source = Some(Box::new(source));
    }

    pub fn unbind(&mut self) {
        debug!(namespace = %self.namespace, "form unbound");
        self.source = None;
    }

    pub fn is_bound(&self) -> bool {
        self.source.is_some()
    }

    pub fn submitted_once(&self) -> bool {
        self.submitted_once
    }

    /// Read, reconstruct and validate the bound source, replacing the
    /// previous result.
    ///
    /// A structural error leaves the previous result in place.
    pub fn validate(&mut self) -> Result<&SafeParse<S::Output>, FormError> {
        let source = self.source.as_ref().ok_or(FormError::MissingBinding)?;
        let tree = Reconstructor::new(self.options.limits)
            .reconstruct(source.entries())
            .map_err(|err| {
                warn!(namespace = %self.namespace, error = %err, "submission could not be reconstructed");
                err
            })?;
        let result = self.schema.safe_parse(&tree);
        debug!(
            namespace = %self.namespace,
            valid = result.is_ok(),
            "form validated"
        );
        self.issues = merge_issues(&result, &self.custom_issues);
        Ok(&*self.validation.insert(result))
    }

    pub fn handle(&mut self, event: FormEvent) -> Result<EventOutcome, FormError> {
        match event {
            FormEvent::Change | FormEvent::Blur => {
                let eager = match event {
                    FormEvent::Change => self.submitted_once || self.options.validate_on_change,
                    _ => self.options.validate_on_blur,
                };
                if !eager {
                    return Ok(EventOutcome::Ignored);
                }
                self.validate()?;
                Ok(EventOutcome::Validated)
            }
            FormEvent::Submit => {
                self.submitted_once = true;
                if self.validate()?.is_ok() {
                    Ok(EventOutcome::Submitted)
                } else {
                    Ok(EventOutcome::Prevented)
                }
            }
            FormEvent::Invalid => {
                self.submitted_once = true;
                self.validate()?;
                Ok(EventOutcome::Validated)
            }
        }
    }

    /// The latest validation result, if any pass has run.
    pub fn validation(&self) -> Option<&SafeParse<S::Output>> {
        self.validation.as_ref()
    }

    /// Parsed output of the latest pass, if it succeeded.
    pub fn data(&self) -> Option<&S::Output> {
        self.validation.as_ref()?.as_ref().ok()
    }

    /// Validation issues followed by custom issues.
    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    pub fn custom_issues(&self) -> &[Issue] {
        &self.custom_issues
    }

    pub fn set_custom_issues(&mut self, issues: impl IntoIterator<Item = Issue>) {
        self.custom_issues = issues.into_iter().collect();
        self.issues = match &self.validation {
            Some(result) => merge_issues(result, &self.custom_issues),
            None => self.custom_issues.clone(),
        };
    }

    pub fn fields(&self) -> FieldChain<'_> {
        let chain = match self.schema.shape() {
            Some(shape) => FieldChain::with_shape(&self.namespace, shape),
            None => FieldChain::new(&self.namespace),
        };
        chain.with_issues(&self.issues)
    }

    pub fn errors(&self) -> IssueChain<'_> {
        match self.schema.shape() {
            Some(shape) => IssueChain::with_shape(&self.issues, shape),
            None => IssueChain::new(&self.issues),
        }
    }

    /// Current raw value of the first input named `name`.
    pub fn value(&self, name: &str) -> Result<Option<FormValue>, FormError> {
        let source = self.source.as_ref().ok_or(FormError::MissingBinding)?;
        Ok(source
            .entries()
            .into_iter()
            .find(|entry| entry.name == name)
            .map(|entry| entry.value))
    }
}

fn merge_issues<T>(result: &SafeParse<T>, custom: &[Issue]) -> Vec<Issue> {
    let mut issues = match result {
        Ok(_) => Vec::new(),
        Err(failure) => failure.issues.clone(),
    };
    issues.extend_from_slice(custom);
    issues
}
