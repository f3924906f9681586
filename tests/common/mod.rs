//! Common test utilities

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use moviegraph::graph::{FilterPolicy, GraphAssembler, Vocabulary};
use tempfile::TempDir;

/// Resource namespace of the default vocabulary
pub const NS: &str = "https://www.scads.de/movieBenchmark/resource/IMDB/";

pub const PERSON_HEADER: &str =
    "nconst\tprimaryName\tbirthYear\tdeathYear\tprimaryProfession\tknownForTitles";
pub const TITLE_HEADER: &str = "tconst\ttitleType\tprimaryTitle\toriginalTitle\tisAdult\tstartYear\tendYear\truntimeMinutes\tgenres";
pub const EPISODE_HEADER: &str = "tconst\tparentTconst\tseasonNumber\tepisodeNumber";
pub const PRINCIPALS_HEADER: &str = "tconst\tordering\tnconst\tcategory\tjob\tcharacters";

/// Full URI of an identifier in the default namespace
pub fn res(id: &str) -> String {
    format!("{NS}{id}")
}

/// Temporary benchmark data directory with an `imdb/` input folder
pub struct ImdbFixture {
    pub dir: TempDir,
}

impl ImdbFixture {
    /// Empty tables, empty allow and exclude sets
    pub fn new() -> Self {
        let fixture = Self {
            dir: TempDir::new().expect("create temp dir"),
        };
        fs::create_dir_all(fixture.imdb_dir()).expect("create imdb dir");
        fixture.person_rows(&[]);
        fixture.title_rows(&[]);
        fixture.episode_rows(&[]);
        fixture.principals_rows(&[]);
        fixture.allowed(&[]);
        fixture.excluded(&[]);
        fixture
    }

    pub fn data_dir(&self) -> &Path {
        self.dir.path()
    }

    pub fn imdb_dir(&self) -> PathBuf {
        self.dir.path().join("imdb")
    }

    pub fn allowed_file(&self) -> PathBuf {
        self.imdb_dir().join("allowed")
    }

    pub fn excluded_file(&self) -> PathBuf {
        self.imdb_dir().join("exclude")
    }

    pub fn write_table(&self, file_name: &str, header: &str, rows: &[&str]) -> &Self {
        let mut content = format!("{header}\n");
        for row in rows {
            content.push_str(row);
            content.push('\n');
        }
        fs::write(self.imdb_dir().join(file_name), content).expect("write table");
        self
    }

    pub fn person_rows(&self, rows: &[&str]) -> &Self {
        self.write_table("name.basics.tsv", PERSON_HEADER, rows)
    }

    pub fn title_rows(&self, rows: &[&str]) -> &Self {
        self.write_table("title.basics.tsv", TITLE_HEADER, rows)
    }

    pub fn episode_rows(&self, rows: &[&str]) -> &Self {
        self.write_table("title.episode.tsv", EPISODE_HEADER, rows)
    }

    pub fn principals_rows(&self, rows: &[&str]) -> &Self {
        self.write_table("title.principals.tsv", PRINCIPALS_HEADER, rows)
    }

    pub fn allowed(&self, ids: &[&str]) -> &Self {
        let content: String = ids.iter().map(|id| format!("{id}\n")).collect();
        fs::write(self.allowed_file(), content).expect("write allowed");
        self
    }

    pub fn excluded(&self, pairs: &[(&str, &str)]) -> &Self {
        let content: String = pairs.iter().map(|(s, o)| format!("{s}\t{o}\n")).collect();
        fs::write(self.excluded_file(), content).expect("write exclude");
        self
    }

    pub fn filter(&self) -> FilterPolicy {
        FilterPolicy::from_files(&self.allowed_file(), &self.excluded_file())
            .expect("load filter sets")
    }

    pub fn assembler(&self) -> GraphAssembler {
        GraphAssembler::new(Vocabulary::default(), self.filter())
    }
}

/// Write `lines` (newline-terminated) to `path`, creating parent dirs
pub fn write_lines(path: &Path, lines: &[&str]) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent dir");
    }
    let content: String = lines.iter().map(|l| format!("{l}\n")).collect();
    fs::write(path, content).expect("write lines");
}
