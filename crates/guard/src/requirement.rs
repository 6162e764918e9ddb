use std::{collections::BTreeSet, pin::pin};

use config::{Quantifier, RouteConfig};
use context::Group;
use futures::{Stream, TryStreamExt};

/// An immutable set of required group names plus the quantifier ruling
/// how many of them must be held.
///
/// The set representation means duplicate caller input collapses, so an
/// ALL requirement can never demand more matches than distinct names.
#[derive(Debug, Clone)]
pub struct GroupRequirement {
    groups: BTreeSet<String>,
    quantifier: Quantifier,
}

/// Outcome of evaluating a requirement against one membership stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Satisfied,
    Denied,
}

impl GroupRequirement {
    pub fn new<I, S>(names: I, quantifier: Quantifier) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            groups: names.into_iter().map(Into::into).collect(),
            quantifier,
        }
    }

    /// Require membership in every named group.
    pub fn all<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(names, Quantifier::All)
    }

    /// Require membership in at least one named group.
    pub fn any<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(names, Quantifier::Any)
    }

    pub fn groups(&self) -> &BTreeSet<String> {
        &self.groups
    }

    pub fn quantifier(&self) -> Quantifier {
        self.quantifier
    }

    /// Drive the membership stream just far enough to decide.
    ///
    /// ANY returns on the first required name seen; ALL returns once every
    /// required name has been seen. Either way the remainder of the stream
    /// is never polled. An exhausted stream without a decision is a denial,
    /// and a stream error aborts the evaluation.
    pub async fn evaluate<S>(&self, memberships: S) -> directory::Result<Verdict>
    where
        S: Stream<Item = directory::Result<Group>>,
    {
        let mut outstanding: BTreeSet<&str> = self.groups.iter().map(String::as_str).collect();

        // Membership in all zero groups holds vacuously; under ANY an empty
        // set has no possible witness, so the loop below denies it.
        if self.quantifier == Quantifier::All && outstanding.is_empty() {
            return Ok(Verdict::Satisfied);
        }

        let mut memberships = pin!(memberships);

        while let Some(group) = memberships.try_next().await? {
            match self.quantifier {
                Quantifier::Any => {
                    if self.groups.contains(&group.name) {
                        return Ok(Verdict::Satisfied);
                    }
                }
                Quantifier::All => {
                    outstanding.remove(group.name.as_str());

                    if outstanding.is_empty() {
                        return Ok(Verdict::Satisfied);
                    }
                }
            }
        }

        Ok(Verdict::Denied)
    }
}

impl From<&RouteConfig> for GroupRequirement {
    fn from(route: &RouteConfig) -> Self {
        Self {
            groups: route.groups.clone(),
            quantifier: route.quantifier,
        }
    }
}
