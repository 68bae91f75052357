//! Category-backed treemap trees for research paper datasets.
//!
//! Papers are grouped by (optionally) year, then by each level of their
//! colon-separated category list. Leaves are papers weighted by citation count.
//!
//! Dataset rows are `authors, title, year, categories, doi, citations` after a
//! header line, e.g.
//!
//! ```text
//! Authors,Title,Year,Category,Url,Citations
//! "Doe, J.",Teaching loops,2015,Curriculum:Programming,https://doi.org/x,12
//! ```

use std::fs::File;
use std::io::Read;
use std::path::Path;

use tracing::{debug, instrument, warn};

use crate::domain::{NamingScheme, NodeId, TmTree};
use crate::variants::error::{VariantError, VariantResult};

/// `:` between names; " (file)" / " (category)" suffixes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CategoryNaming;

impl NamingScheme for CategoryNaming {
    type Meta = PaperMeta;

    fn separator(&self) -> &str {
        ":"
    }

    fn suffix(&self, is_leaf: bool) -> &str {
        if is_leaf {
            " (file)"
        } else {
            " (category)"
        }
    }
}

pub type PaperTree = TmTree<CategoryNaming>;

/// Bibliographic details kept on paper leaves; empty for categories.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaperMeta {
    pub authors: String,
    pub doi: String,
}

/// One dataset row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaperRecord {
    pub authors: String,
    pub title: String,
    pub year: String,
    pub categories: Vec<String>,
    pub doi: String,
    pub citations: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryEntry {
    Category(CategoryMap),
    Paper(PaperRecord),
}

/// Nested category → … → paper mapping that keeps insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryMap {
    entries: Vec<(String, CategoryEntry)>,
}

impl CategoryMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&CategoryEntry> {
        self.entries
            .iter()
            .find(|(entry, _)| entry == name)
            .map(|(_, entry)| entry)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CategoryEntry)> {
        self.entries.iter().map(|(name, entry)| (name.as_str(), entry))
    }

    /// Sub-category `name`, created when missing. None if a paper already
    /// occupies that name.
    fn category_mut(&mut self, name: &str) -> Option<&mut CategoryMap> {
        let position = match self.entries.iter().position(|(entry, _)| entry == name) {
            Some(position) => position,
            None => {
                self.entries
                    .push((name.to_string(), CategoryEntry::Category(CategoryMap::new())));
                self.entries.len() - 1
            }
        };
        match &mut self.entries[position].1 {
            CategoryEntry::Category(map) => Some(map),
            CategoryEntry::Paper(_) => None,
        }
    }

    /// Files `record` under its year (when `by_year`) and categories.
    ///
    /// A later paper with the same title in the same category replaces the
    /// earlier one. Records whose path runs into a paper, or whose title names
    /// an existing category, are skipped; returns whether the record was stored.
    pub fn insert_record(&mut self, record: PaperRecord, by_year: bool) -> bool {
        let mut path: Vec<&str> = Vec::with_capacity(record.categories.len() + 1);
        if by_year {
            path.push(record.year.as_str());
        }
        path.extend(record.categories.iter().map(String::as_str));

        let mut current: &mut CategoryMap = self;
        for segment in path {
            current = match current.category_mut(segment) {
                Some(next) => next,
                None => {
                    warn!(title = %record.title, segment, "category path runs into a paper");
                    return false;
                }
            };
        }

        let title = record.title.clone();
        if let Some((_, existing)) = current.entries.iter_mut().find(|(entry, _)| *entry == title) {
            if matches!(existing, CategoryEntry::Category(_)) {
                warn!(%title, "paper title clashes with a category");
                return false;
            }
            *existing = CategoryEntry::Paper(record);
            return true;
        }
        current.entries.push((title, CategoryEntry::Paper(record)));
        true
    }
}

type Row = (String, String, String, String, String, u64);

/// Parses a paper dataset (with header line) into a category map.
#[instrument(level = "debug", skip(reader))]
pub fn read_papers<R: Read>(reader: R, by_year: bool) -> VariantResult<CategoryMap> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut map = CategoryMap::new();
    let mut rows = 0usize;
    for row in csv_reader.deserialize::<Row>() {
        let (authors, title, year, categories, doi, citations) = row?;
        let categories = categories
            .split(':')
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_string)
            .collect();
        map.insert_record(
            PaperRecord {
                authors,
                title,
                year,
                categories,
                doi,
                citations,
            },
            by_year,
        );
        rows += 1;
    }
    debug!(rows, top_level = map.len(), "read paper dataset");
    Ok(map)
}

/// Reads the dataset file at `path`; see [`read_papers`].
#[instrument(level = "debug")]
pub fn load_papers(path: &Path, by_year: bool) -> VariantResult<CategoryMap> {
    let file = File::open(path).map_err(|source| match source.kind() {
        std::io::ErrorKind::NotFound => VariantError::NotFound(path.to_path_buf()),
        _ => VariantError::Io {
            path: path.to_path_buf(),
            source,
        },
    })?;
    read_papers(file, by_year)
}

/// Builds a tree named `root_name` whose children mirror `map`, bottom-up.
#[instrument(level = "debug", skip(tree, map))]
pub fn build_paper_tree(tree: &mut PaperTree, root_name: &str, map: &CategoryMap) -> NodeId {
    let children = build_entries(tree, map);
    tree.new_node_with_meta(root_name, children, 0, PaperMeta::default())
}

fn build_entries(tree: &mut PaperTree, map: &CategoryMap) -> Vec<NodeId> {
    map.iter()
        .map(|(name, entry)| match entry {
            CategoryEntry::Paper(record) => tree.new_node_with_meta(
                record.title.clone(),
                Vec::new(),
                record.citations,
                PaperMeta {
                    authors: record.authors.clone(),
                    doi: record.doi.clone(),
                },
            ),
            CategoryEntry::Category(sub) => {
                let children = build_entries(tree, sub);
                tree.new_node_with_meta(name, children, 0, PaperMeta::default())
            }
        })
        .collect()
}
