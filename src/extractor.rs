//! Extractor contract and dialect registry
//!
//! An [`Extractor`] translates one annotation dialect's raw elements into
//! path/verb/media-type/parameter facts. Dialects are registered explicitly
//! in an [`ExtractorRegistry`] assembled by the host integration; nothing is
//! discovered implicitly at runtime.

use crate::error::Error;
use crate::model::{Parameter, TypeRef};
use crate::tree::{AnnotationMatch, MemberNode, OwnerNode};
use http::Method;
use std::collections::HashMap;

/// Dialect-specific extraction logic
///
/// Implemented once per annotation dialect. All extraction happens against
/// the already-built match tree; the returned facts feed the path tree
/// merger directly.
pub trait Extractor {
    /// Stable dialect name, used in diagnostics and output grouping
    fn name(&self) -> &'static str;

    /// Whether this dialect claims the given annotation kind
    fn can_handle(&self, annotation_name: &str) -> bool;

    /// All full path aliases a member resolves to, owner path included
    fn extract_full_paths(&self, owner: &OwnerNode, member: &MemberNode)
        -> Result<Vec<String>, Error>;

    /// HTTP verbs declared on the owner and member
    fn extract_methods(&self, owner: &OwnerNode, member: &MemberNode)
        -> Result<Vec<Method>, Error>;

    fn extract_produces(&self, owner: &OwnerNode, member: &MemberNode)
        -> Result<Vec<String>, Error>;

    fn extract_consumes(&self, owner: &OwnerNode, member: &MemberNode)
        -> Result<Vec<String>, Error>;

    /// Defaults to the member's declared return type
    fn extract_return_type(&self, member: &MemberNode) -> TypeRef {
        member.element.return_type.clone()
    }

    fn extract_parameters(&self, member: &MemberNode) -> Result<Vec<Parameter>, Error>;
}

/// Matches claimed by a single extractor, in input order
pub struct DialectMatches<'a> {
    pub extractor: &'a dyn Extractor,
    pub matches: Vec<AnnotationMatch>,
}

/// Explicit mapping from annotation kinds to extractors
///
/// Assembled at process start and passed into the pipeline as a value;
/// nothing is discovered at runtime.
#[derive(Default)]
pub struct ExtractorRegistry {
    extractors: Vec<Box<dyn Extractor>>,
}

impl ExtractorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, extractor: Box<dyn Extractor>) {
        self.extractors.push(extractor);
    }

    /// Resolve the single extractor claiming an annotation kind
    ///
    /// Returns `None` when no extractor claims it (the annotation is simply
    /// not ours) and fails when more than one does.
    pub fn extractor_for(&self, annotation_name: &str) -> Result<Option<&dyn Extractor>, Error> {
        let claiming: Vec<&dyn Extractor> = self
            .extractors
            .iter()
            .map(|e| e.as_ref())
            .filter(|e| e.can_handle(annotation_name))
            .collect();
        match claiming.len() {
            0 => Ok(None),
            1 => Ok(Some(claiming[0])),
            _ => Err(Error::AmbiguousDialect {
                annotation: annotation_name.to_string(),
                extractors: claiming.iter().map(|e| e.name().to_string()).collect(),
            }),
        }
    }

    /// Partition matches by claiming extractor
    ///
    /// Ambiguity aborts before any tree building; unclaimed matches are
    /// skipped. Groups keep registration order, matches keep input order.
    pub fn partition(&self, matches: Vec<AnnotationMatch>) -> Result<Vec<DialectMatches<'_>>, Error> {
        let mut grouped: HashMap<usize, Vec<AnnotationMatch>> = HashMap::new();
        for m in matches {
            let Some(annotation) = m.annotation.as_ref() else {
                continue;
            };
            let name = annotation.name.clone();
            let claiming: Vec<usize> = self
                .extractors
                .iter()
                .enumerate()
                .filter(|(_, e)| e.can_handle(&name))
                .map(|(i, _)| i)
                .collect();
            match claiming.len() {
                0 => {
                    tracing::debug!(annotation = %name, "no extractor claims annotation, skipping");
                }
                1 => grouped.entry(claiming[0]).or_default().push(m),
                _ => {
                    return Err(Error::AmbiguousDialect {
                        annotation: name,
                        extractors: claiming
                            .iter()
                            .map(|&i| self.extractors[i].name().to_string())
                            .collect(),
                    })
                }
            }
        }
        let mut out = Vec::new();
        for (idx, extractor) in self.extractors.iter().enumerate() {
            if let Some(matches) = grouped.remove(&idx) {
                out.push(DialectMatches {
                    extractor: extractor.as_ref(),
                    matches,
                });
            }
        }
        Ok(out)
    }
}
