use lectern_db::{content, module};
use sea_orm::{ConnectionTrait, DbErr};
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

/// Contents of one module inside a [`ContentSequence`], as a half open index range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModuleSpan {
    pub module_id: Uuid,
    pub start: usize,
    pub end: usize,
}

/// Canonical order of all contents of a course.
///
/// Modules are ordered by creation time, the contents of each module by creation time, and the
/// result is concatenated. The sequence is derived from the stored tree on every load and never
/// cached, because the tree can change between two requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentSequence {
    course_id: Uuid,
    ids: Vec<Uuid>,
    modules: Vec<ModuleSpan>,
}

/// Completion percentage of position `index` in a sequence of `len` contents.
///
/// `round(100 * (index + 1) / len)`, rounding halves up. An empty sequence is 0 % complete.
#[must_use]
pub fn percentage(index: usize, len: usize) -> i32 {
    if len == 0 {
        return 0;
    }
    let position = index.min(len - 1) + 1;
    let rounded = (200 * position + len) / (2 * len);
    i32::try_from(rounded).unwrap_or(100)
}

impl ContentSequence {
    pub async fn load<C: ConnectionTrait>(conn: &C, course_id: Uuid) -> Result<Self, DbErr> {
        let modules = module::Query::find_by_course(conn, course_id).await?;
        let module_ids: Vec<Uuid> = modules.iter().map(|module| module.id).collect();
        let contents = content::Query::find_by_modules(conn, &module_ids).await?;

        let mut by_module: HashMap<Uuid, Vec<Uuid>> = HashMap::with_capacity(module_ids.len());
        for content in contents {
            by_module.entry(content.module_id).or_default().push(content.id);
        }

        let grouped = module_ids
            .into_iter()
            .map(|module_id| {
                let contents = by_module.remove(&module_id).unwrap_or_default();
                (module_id, contents)
            })
            .collect();
        let sequence = Self::from_modules(course_id, grouped);
        tracing::trace!(%course_id, len = sequence.len(), "loaded content sequence");
        Ok(sequence)
    }

    /// Builds a sequence from modules that are already in canonical order.
    #[must_use]
    pub fn from_modules(course_id: Uuid, modules: Vec<(Uuid, Vec<Uuid>)>) -> Self {
        let mut ids = Vec::new();
        let mut spans = Vec::with_capacity(modules.len());
        for (module_id, contents) in modules {
            let start = ids.len();
            ids.extend(contents);
            spans.push(ModuleSpan {
                module_id,
                start,
                end: ids.len(),
            });
        }
        Self {
            course_id,
            ids,
            modules: spans,
        }
    }

    #[must_use]
    pub fn course_id(&self) -> Uuid {
        self.course_id
    }

    #[must_use]
    pub fn ids(&self) -> &[Uuid] {
        &self.ids
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    #[must_use]
    pub fn position(&self, content_id: Uuid) -> Option<usize> {
        self.ids.iter().position(|id| *id == content_id)
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<Uuid> {
        self.ids.get(index).copied()
    }

    #[must_use]
    pub fn contains(&self, content_id: Uuid) -> bool {
        self.ids.contains(&content_id)
    }

    /// Contents up to and including `index`.
    #[must_use]
    pub fn watched(&self, index: usize) -> Vec<Uuid> {
        let end = (index + 1).min(self.ids.len());
        self.ids[..end].to_vec()
    }

    #[must_use]
    pub fn percentage_at(&self, index: usize) -> i32 {
        percentage(index, self.ids.len())
    }

    #[must_use]
    pub fn modules(&self) -> &[ModuleSpan] {
        &self.modules
    }

    /// Contents of `module_id` in canonical order. Empty if the module is not part of the course.
    #[must_use]
    pub fn module_contents(&self, module_id: Uuid) -> &[Uuid] {
        self.modules
            .iter()
            .find(|span| span.module_id == module_id)
            .map_or(&[], |span| &self.ids[span.start..span.end])
    }

    /// The sequence that remains once `removed` is gone.
    #[must_use]
    pub fn without(&self, removed: &HashSet<Uuid>) -> Self {
        let modules = self
            .modules
            .iter()
            .map(|span| {
                let kept = self.ids[span.start..span.end]
                    .iter()
                    .copied()
                    .filter(|id| !removed.contains(id))
                    .collect();
                (span.module_id, kept)
            })
            .collect();
        Self::from_modules(self.course_id, modules)
    }

    /// Nearest content before `index` that is not in `removed`.
    ///
    /// This walks the whole course, so the first content of a module falls back to the last
    /// surviving content of an earlier module.
    #[must_use]
    pub fn preceding_survivor(&self, index: usize, removed: &HashSet<Uuid>) -> Option<Uuid> {
        self.ids[..index.min(self.ids.len())]
            .iter()
            .rev()
            .find(|id| !removed.contains(id))
            .copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(n: usize) -> Vec<Uuid> {
        (0..n).map(|_| Uuid::new_v4()).collect()
    }

    #[test]
    fn test_percentage_rounds_to_nearest() {
        assert_eq!(percentage(0, 3), 33);
        assert_eq!(percentage(1, 3), 67);
        assert_eq!(percentage(2, 3), 100);
        assert_eq!(percentage(0, 2), 50);
        assert_eq!(percentage(0, 8), 13);
        assert_eq!(percentage(0, 6), 17);
        assert_eq!(percentage(0, 1), 100);
    }

    #[test]
    fn test_percentage_of_empty_sequence_is_zero() {
        assert_eq!(percentage(0, 0), 0);
        assert_eq!(percentage(5, 0), 0);
    }

    #[test]
    fn test_percentage_matches_float_rounding() {
        for len in 1..=40_usize {
            for index in 0..len {
                #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
                let expected = (100.0 * (index + 1) as f64 / len as f64).round() as i32;
                assert_eq!(percentage(index, len), expected, "index {index} of {len}");
            }
        }
    }

    #[test]
    fn test_concatenates_modules_in_order() {
        let course_id = Uuid::new_v4();
        let (m1, m2, m3) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());
        let a = ids(2);
        let b = ids(3);
        let sequence = ContentSequence::from_modules(course_id, vec![(m1, a.clone()), (m2, vec![]), (m3, b.clone())]);

        assert_eq!(sequence.len(), 5);
        assert_eq!(&sequence.ids()[..2], a.as_slice());
        assert_eq!(&sequence.ids()[2..], b.as_slice());
        assert_eq!(sequence.module_contents(m3), b.as_slice());
        assert!(sequence.module_contents(m2).is_empty());
        assert!(sequence.module_contents(Uuid::new_v4()).is_empty());
        assert_eq!(sequence.position(b[0]), Some(2));
        assert_eq!(sequence.watched(2), vec![a[0], a[1], b[0]]);
    }

    #[test]
    fn test_preceding_survivor_crosses_module_boundaries() {
        let (m1, m2, m3) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());
        let a = ids(2);
        let b = ids(2);
        let sequence = ContentSequence::from_modules(
            Uuid::new_v4(),
            vec![(m1, a.clone()), (m2, vec![]), (m3, b.clone())],
        );
        let removed: HashSet<Uuid> = b.iter().copied().collect();

        assert_eq!(sequence.preceding_survivor(2, &removed), Some(a[1]));
        assert_eq!(sequence.preceding_survivor(3, &removed), Some(a[1]));
        assert_eq!(sequence.preceding_survivor(0, &removed), None);

        let all: HashSet<Uuid> = sequence.ids().iter().copied().collect();
        assert_eq!(sequence.preceding_survivor(3, &all), None);
    }

    #[test]
    fn test_without_keeps_module_layout() {
        let (m1, m2) = (Uuid::new_v4(), Uuid::new_v4());
        let a = ids(2);
        let b = ids(1);
        let sequence = ContentSequence::from_modules(Uuid::new_v4(), vec![(m1, a.clone()), (m2, b.clone())]);
        let removed = HashSet::from([a[0]]);

        let rest = sequence.without(&removed);
        assert_eq!(rest.ids(), &[a[1], b[0]]);
        assert_eq!(rest.module_contents(m2), b.as_slice());
    }
}
