//! Path tree merging
//!
//! Consumes the owner/member tree plus per-member extraction and merges
//! every resolved path alias into a single deduplicated forest of
//! [`PathNode`]s. Each distinct resolved path appears exactly once and
//! carries at most one [`Endpoint`]; a second endpoint at the same resolved
//! path aborts the run.

use crate::error::Error;
use crate::extractor::Extractor;
use crate::model::{Parameter, TypeRef};
use crate::tree::OwnerNode;
use http::Method;

/// The resolved HTTP contract for one path tree node
#[derive(Debug, Clone, PartialEq)]
pub struct Endpoint {
    /// Verbs fan out only at emission time; the return type and parameter
    /// list are shared by all of them
    pub methods: Vec<Method>,
    pub produces: Vec<String>,
    pub consumes: Vec<String>,
    pub return_type: TypeRef,
    pub parameters: Vec<Parameter>,
}

/// An immutable node of the merged path tree
#[derive(Debug, Clone, PartialEq)]
pub struct PathNode {
    /// Identifier-safe name used in emitted code; parameter segments
    /// inherit the nearest static ancestor's name
    pub name: String,
    /// Cumulative resolved path up to and including this segment
    pub path: String,
    /// Whether this node's own segment is a path parameter (`{id}`)
    pub parameter: bool,
    /// Children in first-seen order
    pub children: Vec<PathNode>,
    pub endpoint: Option<Endpoint>,
}

/// Collapse doubled separators introduced by owner/member path concatenation
pub fn collapse_separators(path: &str) -> String {
    let mut out = path.to_string();
    while out.contains("//") {
        out = out.replace("//", "/");
    }
    out
}

fn split_segments(path: &str) -> Vec<String> {
    collapse_separators(path)
        .split('/')
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Turn a path segment into an identifier usable as a JS property name
fn identifier(segment: &str) -> String {
    let mut out: String = segment
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect();
    if out.is_empty() {
        out.push('_');
    }
    if out.chars().next().is_some_and(|c| c.is_ascii_digit()) {
        out.insert(0, '_');
    }
    out
}

struct Slot {
    name: String,
    path: String,
    parameter: bool,
    children: Vec<usize>,
    endpoint: Option<Endpoint>,
}

/// Arena-backed construction of the path forest
///
/// Nodes are addressed by index while the tree is growing; [`freeze`]
/// converts the arena into the immutable [`PathNode`] view once merging is
/// complete.
///
/// [`freeze`]: PathTreeBuilder::freeze
#[derive(Default)]
pub struct PathTreeBuilder {
    slots: Vec<Slot>,
    roots: Vec<usize>,
}

impl PathTreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge one resolved full path, attaching `endpoint` at its final
    /// segment
    ///
    /// `owner_name` names nodes for paths with no usable segments (an
    /// endpoint mounted at `/`).
    pub fn insert(
        &mut self,
        owner_name: &str,
        full_path: &str,
        endpoint: Endpoint,
    ) -> Result<(), Error> {
        let segments = split_segments(full_path);
        if segments.is_empty() {
            let idx = self.root_for("/", || (identifier(owner_name), false));
            return self.attach(idx, endpoint);
        }

        let mut cumulative = String::new();
        let mut static_name = identifier(owner_name);
        let mut current: Option<usize> = None;
        let last = segments.len() - 1;
        for (i, segment) in segments.iter().enumerate() {
            cumulative.push('/');
            cumulative.push_str(segment);
            let is_parameter = segment.starts_with('{');
            if !is_parameter {
                static_name = identifier(segment);
            }
            let name = static_name.clone();
            let idx = match current {
                None => self.root_for(&cumulative, || (name, is_parameter)),
                Some(parent) => self.child_for(parent, &cumulative, name, is_parameter),
            };
            if i == last {
                self.attach(idx, endpoint)?;
                return Ok(());
            }
            current = Some(idx);
        }
        Ok(())
    }

    fn root_for(&mut self, path: &str, make: impl FnOnce() -> (String, bool)) -> usize {
        if let Some(&idx) = self.roots.iter().find(|&&i| self.slots[i].path == path) {
            return idx;
        }
        let (name, parameter) = make();
        let idx = self.push_slot(name, path, parameter);
        self.roots.push(idx);
        idx
    }

    fn child_for(&mut self, parent: usize, path: &str, name: String, parameter: bool) -> usize {
        if let Some(&idx) = self.slots[parent]
            .children
            .iter()
            .find(|&&i| self.slots[i].path == path)
        {
            return idx;
        }
        let idx = self.push_slot(name, path, parameter);
        self.slots[parent].children.push(idx);
        idx
    }

    fn push_slot(&mut self, name: String, path: &str, parameter: bool) -> usize {
        self.slots.push(Slot {
            name,
            path: path.to_string(),
            parameter,
            children: Vec::new(),
            endpoint: None,
        });
        self.slots.len() - 1
    }

    fn attach(&mut self, idx: usize, endpoint: Endpoint) -> Result<(), Error> {
        let slot = &mut self.slots[idx];
        if slot.endpoint.is_some() {
            return Err(Error::DuplicateEndpoint {
                path: slot.path.clone(),
            });
        }
        slot.endpoint = Some(endpoint);
        Ok(())
    }

    /// Freeze the arena into immutable nodes, preserving first-seen order
    pub fn freeze(self) -> Vec<PathNode> {
        fn build(slots: &mut [Option<Slot>], idx: usize) -> Option<PathNode> {
            let slot = slots[idx].take()?;
            let child_indices = slot.children.clone();
            Some(PathNode {
                name: slot.name,
                path: slot.path,
                parameter: slot.parameter,
                children: child_indices
                    .into_iter()
                    .filter_map(|c| build(slots, c))
                    .collect(),
                endpoint: slot.endpoint,
            })
        }
        let mut slots: Vec<Option<Slot>> = self.slots.into_iter().map(Some).collect();
        self.roots
            .into_iter()
            .filter_map(|r| build(&mut slots, r))
            .collect()
    }
}

/// Merge every (owner, member) pair's extraction into one path forest
///
/// Also collects the return and body-parameter types reached along the way,
/// in first-seen order, for the type graph transformer.
pub fn merge_paths(
    extractor: &dyn Extractor,
    owners: &[OwnerNode],
) -> Result<(Vec<PathNode>, Vec<TypeRef>), Error> {
    let mut builder = PathTreeBuilder::new();
    let mut types_found: Vec<TypeRef> = Vec::new();

    for owner in owners {
        for member in &owner.members {
            let full_paths = extractor.extract_full_paths(owner, member)?;
            let methods = extractor.extract_methods(owner, member)?;
            let produces = extractor.extract_produces(owner, member)?;
            let consumes = extractor.extract_consumes(owner, member)?;
            let return_type = extractor.extract_return_type(member);
            let parameters = extractor.extract_parameters(member)?;

            record_type(&mut types_found, &return_type);
            for parameter in &parameters {
                if let Parameter::Body(body) = parameter {
                    record_type(&mut types_found, &body.ty);
                }
            }

            // each path alias merges independently, sharing one contract
            for full_path in &full_paths {
                let endpoint = Endpoint {
                    methods: methods.clone(),
                    produces: produces.clone(),
                    consumes: consumes.clone(),
                    return_type: return_type.clone(),
                    parameters: parameters.clone(),
                };
                builder.insert(&owner.element.simple_name, full_path, endpoint)?;
            }
        }
    }

    Ok((builder.freeze(), types_found))
}

fn record_type(out: &mut Vec<TypeRef>, ty: &TypeRef) {
    if *ty != TypeRef::Unit && !out.contains(ty) {
        out.push(ty.clone());
    }
}

/// Number of endpoints attached anywhere in the forest
pub fn endpoint_count(nodes: &[PathNode]) -> usize {
    nodes
        .iter()
        .map(|n| usize::from(n.endpoint.is_some()) + endpoint_count(&n.children))
        .sum()
}
