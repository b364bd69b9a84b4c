//! I implement the matching algorithm.
//!
//! Stages, in order:
//! - trivial accept (same set) and reject (different sizes, for equality);
//! - ground triple elimination;
//! - degree classification of blank nodes;
//! - identity shortcut (blank nodes mapped to blank nodes with the same label);
//! - binding of blank nodes with a unique degree, or used once;
//! - extraction of dependency pairs;
//! - binding of independent blank nodes;
//! - binding of dependency pairs whose image is uniquely determined;
//! - completion check;
//! - backtracking from the forced bindings (unique degree, used once, resolved pairs).
//!
//! Every mapping is validated against the whole set of triples before being returned.

use crate::{BnodeMapping, MatchError, MatchMode, MatchOptions, Result, TripleSet};
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::time::Instant;
use trine_term::{BlankNode, Triple};

/// Compares sets of triples up to blank node relabeling.
///
/// A matcher holds no state between invocations; it can be reused and shared.
#[derive(Clone, Copy, Debug, Default)]
pub struct GraphMatcher {
    options: MatchOptions,
}

impl GraphMatcher {
    /// A matcher bounded by `options`.
    pub fn new(options: MatchOptions) -> Self {
        GraphMatcher { options }
    }

    /// The options of this matcher.
    pub fn options(&self) -> &MatchOptions {
        &self.options
    }

    /// Whether `a` and `b` are the same graph up to blank node relabeling.
    ///
    /// On success, the mapping from the blank nodes of `a` to those of `b` is returned.
    ///
    /// # Error
    /// - [`MatchError::UnsupportedGraphShape`] if either set contains a triple made only of blank nodes;
    /// - [`MatchError::Indeterminate`] if the search budget is exhausted.
    pub fn equals<A, B>(&self, a: &A, b: &B) -> Result<(bool, Option<BnodeMapping>)>
    where
        A: TripleSet + ?Sized,
        B: TripleSet + ?Sized,
    {
        let mapping = self.find_mapping(a, b, MatchMode::Equal)?;
        Ok((mapping.is_some(), mapping))
    }

    /// Whether every triple of `a` is found in `b`, up to blank node relabeling.
    ///
    /// On success, the mapping from the blank nodes of `a` to those of `b` is returned.
    ///
    /// # Error
    /// Same as [`GraphMatcher::equals`].
    pub fn is_subgraph_of<A, B>(&self, a: &A, b: &B) -> Result<(bool, Option<BnodeMapping>)>
    where
        A: TripleSet + ?Sized,
        B: TripleSet + ?Sized,
    {
        let mapping = self.find_mapping(a, b, MatchMode::SubGraph)?;
        Ok((mapping.is_some(), mapping))
    }

    /// Look for a mapping from the blank nodes of `a` to those of `b`, according to `mode`.
    ///
    /// # Error
    /// Same as [`GraphMatcher::equals`].
    pub fn find_mapping<A, B>(&self, a: &A, b: &B, mode: MatchMode) -> Result<Option<BnodeMapping>>
    where
        A: TripleSet + ?Sized,
        B: TripleSet + ?Sized,
    {
        // slices sharing a start address are only the same set if they have the same length
        let same = std::ptr::eq(a as *const A as *const u8, b as *const B as *const u8)
            && std::mem::size_of_val(a) == std::mem::size_of_val(b);
        let source = a.triple_vec();
        check_shape(&source)?;
        if same {
            log::debug!("{mode:?}: identical sets of {} triples", source.len());
            return Ok(Some(
                source
                    .iter()
                    .flat_map(|t| t.blank_nodes())
                    .map(|b| (b.clone(), b.clone()))
                    .collect(),
            ));
        }
        let target = b.triple_vec();
        check_shape(&target)?;
        if mode == MatchMode::Equal && source.len() != target.len() {
            log::debug!("{mode:?}: {} triples vs {}", source.len(), target.len());
            return Ok(None);
        }
        find(mode, &self.options, source, target)
    }
}

fn check_shape(triples: &[Triple]) -> Result<()> {
    match triples.iter().find(|t| t.is_all_blank()) {
        Some(t) => Err(MatchError::UnsupportedGraphShape(t.to_string())),
        None => Ok(()),
    }
}

fn find(
    mode: MatchMode,
    options: &MatchOptions,
    source: Vec<Triple>,
    target: Vec<Triple>,
) -> Result<Option<BnodeMapping>> {
    let mut remaining: HashSet<Triple> = target.into_iter().collect();
    let (ground, blank): (Vec<_>, Vec<_>) = source.into_iter().partition(Triple::is_ground);
    for t in &ground {
        if !remaining.remove(t) {
            log::debug!("{mode:?}: ground triple {t} not in target");
            return Ok(None);
        }
    }
    let (tgt_ground, tgt_blank): (Vec<_>, Vec<_>) =
        remaining.into_iter().partition(Triple::is_ground);
    if mode == MatchMode::Equal && !tgt_ground.is_empty() {
        log::debug!("{mode:?}: {} ground triples only in target", tgt_ground.len());
        return Ok(None);
    }
    if blank.is_empty() {
        if mode == MatchMode::Equal && !tgt_blank.is_empty() {
            return Ok(None);
        }
        log::debug!("{mode:?}: ground triples only, nothing to map");
        return Ok(Some(BnodeMapping::default()));
    }
    Search::new(mode, options, blank, tgt_blank).run()
}

/// A partial injective mapping under construction.
#[derive(Clone, Debug, Default)]
struct Binding {
    fwd: HashMap<BlankNode, BlankNode>,
    used: HashSet<BlankNode>,
}

impl Binding {
    fn get(&self, x: &BlankNode) -> Option<&BlankNode> {
        self.fwd.get(x)
    }

    fn is_used(&self, c: &BlankNode) -> bool {
        self.used.contains(c)
    }

    fn len(&self) -> usize {
        self.fwd.len()
    }

    /// Bind `x` to `c`, unless either is already bound.
    fn bind(&mut self, x: &BlankNode, c: &BlankNode) -> bool {
        if self.fwd.contains_key(x) || self.used.contains(c) {
            return false;
        }
        self.fwd.insert(x.clone(), c.clone());
        self.used.insert(c.clone());
        true
    }

    fn unbind(&mut self, x: &BlankNode) {
        if let Some(c) = self.fwd.remove(x) {
            self.used.remove(&c);
        }
    }

    fn apply(&self, t: &Triple) -> Triple {
        t.map_blank_nodes(|b| self.fwd.get(b).unwrap_or(b).clone())
    }
}

impl From<Binding> for BnodeMapping {
    fn from(binding: Binding) -> Self {
        binding.fwd.into_iter().collect()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum PairKind {
    SubjectPredicate,
    SubjectObject,
    PredicateObject,
}

/// Two distinct blank nodes sharing a triple.
#[derive(Clone, Debug)]
struct DependencyPair {
    kind: PairKind,
    first: BlankNode,
    second: BlankNode,
    triple: Triple,
}

type Degrees = BTreeMap<BlankNode, usize>;
type Involving = HashMap<BlankNode, Vec<Triple>>;

/// The degree of every blank node, and the triples involving it.
fn classify(triples: &[Triple]) -> (Degrees, Involving) {
    let mut degree = Degrees::new();
    let mut involving = Involving::new();
    for t in triples {
        for b in t.blank_nodes() {
            *degree.entry(b.clone()).or_insert(0) += 1;
        }
        let distinct: BTreeSet<&BlankNode> = t.blank_nodes().collect();
        for b in distinct {
            involving.entry(b.clone()).or_default().push(t.clone());
        }
    }
    (degree, involving)
}

fn by_degree(degrees: &Degrees) -> BTreeMap<usize, Vec<&BlankNode>> {
    let mut map: BTreeMap<usize, Vec<&BlankNode>> = BTreeMap::new();
    for (b, d) in degrees {
        map.entry(*d).or_default().push(b);
    }
    map
}

/// The state of one invocation, once ground triples are out of the way.
struct Search<'o> {
    mode: MatchMode,
    options: &'o MatchOptions,
    steps: u64,
    source: Vec<Triple>,
    target: HashSet<Triple>,
    src_degree: Degrees,
    tgt_degree: Degrees,
    src_involving: Involving,
    tgt_involving: Involving,
}

impl<'o> Search<'o> {
    fn new(mode: MatchMode, options: &'o MatchOptions, source: Vec<Triple>, target: Vec<Triple>) -> Self {
        let (src_degree, src_involving) = classify(&source);
        let (tgt_degree, tgt_involving) = classify(&target);
        Search {
            mode,
            options,
            steps: 0,
            source,
            target: target.into_iter().collect(),
            src_degree,
            tgt_degree,
            src_involving,
            tgt_involving,
        }
    }

    fn run(mut self) -> Result<Option<BnodeMapping>> {
        let mode = self.mode;
        if !self.degrees_compatible() {
            log::debug!("{mode:?}: blank node degrees differ");
            return Ok(None);
        }
        if let Some(binding) = self.identity_shortcut() {
            log::debug!("{mode:?}: identical labels");
            return Ok(Some(binding.into()));
        }

        let mut base = Binding::default();
        if !self.bind_forced(&mut base) {
            log::debug!("{mode:?}: no partner for a blank node with a unique degree or used once");
            return Ok(None);
        }
        log::debug!("{mode:?}: {} forced bindings", base.len());

        let pairs = self.dependency_pairs();
        let dependent: HashSet<&BlankNode> =
            pairs.iter().flat_map(|p| [&p.first, &p.second]).collect();
        let independent: Vec<&BlankNode> = self
            .src_degree
            .keys()
            .filter(|x| !dependent.contains(x))
            .collect();
        log::debug!(
            "{mode:?}: {} dependency pairs, {} independent blank nodes",
            pairs.len(),
            independent.len()
        );

        let mut working = base.clone();
        let mut working_valid = true;
        if !self.bind_independent(&mut working, &independent) {
            if mode == MatchMode::Equal {
                log::debug!("{mode:?}: no partner for an independent blank node");
                return Ok(None);
            }
            working = base.clone();
            working_valid = false;
        }

        if !self.resolve_dependencies(&pairs, &mut base, &mut working, &mut working_valid) {
            log::debug!("{mode:?}: a dependency pair has no counterpart");
            return Ok(None);
        }

        if working_valid && self.validate(&working) {
            log::debug!("{mode:?}: matched without backtracking");
            return Ok(Some(working.into()));
        }
        self.backtrack_from(base)
    }

    fn degree_compatible(&self, x: &BlankNode, c: &BlankNode) -> bool {
        let (Some(dx), Some(dc)) = (self.src_degree.get(x), self.tgt_degree.get(c)) else {
            return false;
        };
        match self.mode {
            MatchMode::Equal => dx == dc,
            MatchMode::SubGraph => dc >= dx,
        }
    }

    fn degrees_compatible(&self) -> bool {
        match self.mode {
            MatchMode::Equal => {
                if self.source.len() != self.target.len()
                    || self.src_degree.len() != self.tgt_degree.len()
                {
                    return false;
                }
                let mut d1: Vec<_> = self.src_degree.values().collect();
                let mut d2: Vec<_> = self.tgt_degree.values().collect();
                d1.sort_unstable();
                d2.sort_unstable();
                d1 == d2
            }
            MatchMode::SubGraph => {
                self.source.len() <= self.target.len()
                    && self.src_degree.len() <= self.tgt_degree.len()
            }
        }
    }

    fn identity_shortcut(&self) -> Option<Binding> {
        let mut by_label: HashMap<&str, &BlankNode> = HashMap::new();
        for c in self.tgt_degree.keys() {
            if by_label.insert(c.label(), c).is_some() {
                return None;
            }
        }
        let mut binding = Binding::default();
        for x in self.src_degree.keys() {
            let c = by_label.get(x.label())?;
            if !binding.bind(x, c) {
                return None;
            }
        }
        self.validate(&binding).then_some(binding)
    }

    /// Whether `tgt` can be the image of `src`, extending `binding`.
    fn compatible(&self, src: &Triple, tgt: &Triple, binding: &Binding) -> bool {
        let mut local: Vec<(&BlankNode, &BlankNode)> = Vec::with_capacity(2);
        for (sn, tn) in src.spo().iter().zip(tgt.spo()) {
            match (sn.as_blank(), tn.as_blank()) {
                (None, _) => {
                    if sn != tn {
                        return false;
                    }
                }
                (Some(_), None) => return false,
                (Some(sb), Some(tb)) => {
                    if let Some(image) = binding.get(sb) {
                        if image != tb {
                            return false;
                        }
                        continue;
                    }
                    if binding.is_used(tb) || !self.degree_compatible(sb, tb) {
                        return false;
                    }
                    if local.iter().any(|(s2, t2)| (*s2 == sb) != (*t2 == tb)) {
                        return false;
                    }
                    local.push((sb, tb));
                }
            }
        }
        true
    }

    /// The target triples which can be the image of `t`, extending `binding`.
    fn candidates_for(&self, t: &Triple, binding: &Binding) -> Vec<&Triple> {
        match t.blank_nodes().find_map(|b| binding.get(b)) {
            Some(c) => self
                .tgt_involving
                .get(c)
                .into_iter()
                .flatten()
                .filter(|u| self.compatible(t, u, binding))
                .collect(),
            None => self
                .target
                .iter()
                .filter(|u| self.compatible(t, u, binding))
                .collect(),
        }
    }

    /// Bind the blank nodes whose partner is determined by their degree.
    /// Return `false` if one of them has no possible partner.
    fn bind_forced(&self, base: &mut Binding) -> bool {
        if self.mode == MatchMode::Equal {
            let src_by_degree = by_degree(&self.src_degree);
            let tgt_by_degree = by_degree(&self.tgt_degree);
            for (d, xs) in &src_by_degree {
                if let ([x], Some([c])) = (xs.as_slice(), tgt_by_degree.get(d).map(Vec::as_slice)) {
                    log::trace!("unique degree {d}: {x} -> {c}");
                    if !base.bind(x, c) {
                        return false;
                    }
                }
            }
        }
        for (x, d) in &self.src_degree {
            if *d != 1 || base.get(x).is_some() {
                continue;
            }
            let Some(t) = self.src_involving.get(x).and_then(|ts| ts.first()) else {
                continue;
            };
            let Some(pos) = t.spo().iter().position(|n| n.as_blank() == Some(x)) else {
                continue;
            };
            let partners: BTreeSet<&BlankNode> = self
                .candidates_for(t, base)
                .into_iter()
                .filter_map(|u| u.spo()[pos].as_blank())
                .collect();
            match partners.into_iter().collect::<Vec<_>>().as_slice() {
                [] => return false,
                [c] => {
                    log::trace!("used once: {x} -> {c}");
                    if !base.bind(x, c) {
                        return false;
                    }
                }
                _ => {}
            }
        }
        true
    }

    fn dependency_pairs(&self) -> Vec<DependencyPair> {
        self.source
            .iter()
            .filter_map(|t| {
                let [s, p, o] = t.spo();
                let (kind, first, second) = match (s.as_blank(), p.as_blank(), o.as_blank()) {
                    (Some(s), Some(p), None) => (PairKind::SubjectPredicate, s, p),
                    (Some(s), None, Some(o)) => (PairKind::SubjectObject, s, o),
                    (None, Some(p), Some(o)) => (PairKind::PredicateObject, p, o),
                    _ => return None,
                };
                (first != second).then(|| DependencyPair {
                    kind,
                    first: first.clone(),
                    second: second.clone(),
                    triple: t.clone(),
                })
            })
            .collect()
    }

    /// Greedily bind blank nodes which share no triple with another blank node.
    /// Return `false` if one of them has no partner.
    fn bind_independent(&self, working: &mut Binding, independent: &[&BlankNode]) -> bool {
        for x in independent {
            if working.get(x).is_some() {
                continue;
            }
            let triples = self.src_involving.get(*x).map(Vec::as_slice).unwrap_or_default();
            let found = self
                .tgt_degree
                .keys()
                .filter(|c| !working.is_used(c) && self.degree_compatible(x, c))
                .find(|c| {
                    triples.iter().all(|t| {
                        let image = t.map_blank_nodes(|b| if b == *x { (*c).clone() } else { b.clone() });
                        self.target.contains(&image)
                    })
                })
                .cloned();
            match found {
                Some(c) => {
                    log::trace!("independent: {x} -> {c}");
                    working.bind(x, &c);
                }
                None => return false,
            }
        }
        true
    }

    /// Bind dependency pairs having a single possible image, until no more can be bound.
    /// Return `false` if a pair has no possible image.
    fn resolve_dependencies(
        &self,
        pairs: &[DependencyPair],
        base: &mut Binding,
        working: &mut Binding,
        working_valid: &mut bool,
    ) -> bool {
        loop {
            let mut progress = false;
            for pair in pairs {
                if base.get(&pair.first).is_some() && base.get(&pair.second).is_some() {
                    continue;
                }
                let image = match self.candidates_for(&pair.triple, base).as_slice() {
                    [] => return false,
                    [u] => (*u).clone(),
                    _ => continue,
                };
                log::trace!("{:?} pair of {} resolved to {image}", pair.kind, pair.triple);
                for (sn, tn) in pair.triple.spo().iter().zip(image.spo()) {
                    let (Some(x), Some(c)) = (sn.as_blank(), tn.as_blank()) else {
                        continue;
                    };
                    if base.get(x).is_some() {
                        continue;
                    }
                    if !base.bind(x, c) {
                        return false;
                    }
                    if *working_valid && working.get(x) != Some(c) && !working.bind(x, c) {
                        *working_valid = false;
                    }
                }
                progress = true;
            }
            if !progress {
                return true;
            }
        }
    }

    /// Whether `binding` is complete and maps the source into (or onto) the target.
    fn validate(&self, binding: &Binding) -> bool {
        if binding.len() != self.src_degree.len() {
            return false;
        }
        let mut remaining = self.target.clone();
        for t in &self.source {
            if !remaining.remove(&binding.apply(t)) {
                return false;
            }
        }
        self.mode == MatchMode::SubGraph || remaining.is_empty()
    }

    /// Whether the triples involving `x` can still be mapped, now that `x` is bound.
    fn consistent(&self, binding: &Binding, x: &BlankNode) -> bool {
        let Some(c) = binding.get(x) else {
            return false;
        };
        let Some(triples) = self.src_involving.get(x) else {
            return true;
        };
        triples.iter().all(|t| {
            if t.blank_nodes().all(|b| binding.get(b).is_some()) {
                self.target.contains(&binding.apply(t))
            } else {
                self.tgt_involving
                    .get(c)
                    .into_iter()
                    .flatten()
                    .any(|u| self.compatible(t, u, binding))
            }
        })
    }

    fn step(&mut self) -> Result<()> {
        let exhausted = self.options.step_limit.is_some_and(|limit| self.steps >= limit)
            || self.options.deadline.is_some_and(|deadline| Instant::now() >= deadline);
        if exhausted {
            log::debug!("{:?}: search abandoned after {} steps", self.mode, self.steps);
            return Err(MatchError::Indeterminate { steps: self.steps });
        }
        self.steps += 1;
        Ok(())
    }

    fn backtrack_from(&mut self, base: Binding) -> Result<Option<BnodeMapping>> {
        let mut order: Vec<BlankNode> = self
            .src_degree
            .keys()
            .filter(|x| base.get(x).is_none())
            .cloned()
            .collect();
        order.sort_by(|x, y| {
            self.src_degree[y]
                .cmp(&self.src_degree[x])
                .then_with(|| x.cmp(y))
        });
        log::debug!("{:?}: backtracking over {} blank nodes", self.mode, order.len());
        let mut binding = base;
        if self.extend(&mut binding, &order)? {
            log::debug!("{:?}: matched after {} steps", self.mode, self.steps);
            Ok(Some(binding.into()))
        } else {
            log::debug!("{:?}: no match after {} steps", self.mode, self.steps);
            Ok(None)
        }
    }

    fn extend(&mut self, binding: &mut Binding, order: &[BlankNode]) -> Result<bool> {
        let Some((x, rest)) = order.split_first() else {
            return Ok(self.validate(binding));
        };
        let candidates: Vec<BlankNode> = self
            .tgt_degree
            .keys()
            .filter(|c| !binding.is_used(c) && self.degree_compatible(x, c))
            .cloned()
            .collect();
        for c in candidates {
            self.step()?;
            log::trace!("step {}: {x} -> {c}", self.steps);
            binding.bind(x, &c);
            if self.consistent(binding, x) && self.extend(binding, rest)? {
                return Ok(true);
            }
            binding.unbind(x);
        }
        Ok(false)
    }
}
