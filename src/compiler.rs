// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! The whole pipeline: load, aggregate, compress, render, write.
//!
//! Everything is rendered in memory before the first byte is written, and the
//! files are moved into place by renaming, so a failed run leaves the output
//! directory as it was.

use std::fs;
use std::path::{Path, PathBuf};

use crate::aggregate::Aggregator;
use crate::apperr::{Error, Result};
use crate::config::Config;
use crate::emit::{self, Tables};
use crate::idna::{self, IdnaTable};
use crate::interner::Interner;
use crate::normalization::{DecompositionTable, LigatureTable};
use crate::packing::RecordLayout;
use crate::sources::Sources;
use crate::trie::{Trie, TrieConfig};

pub const TYPES_FILE: &str = "ucd_types.rs";
pub const TABLES_FILE: &str = "ucd_tables.rs";

/// Record indices are stored as trie values.
const RECORD_LIMIT: usize = 1 << 16;

pub struct Artifacts {
    pub types: String,
    pub tables: String,
}

pub fn run(config: &Config) -> Result<()> {
    tracing::info!(
        target: "ucd",
        ucd_dir = %config.ucd_dir.display(),
        defaults = config.defaults.version,
        "loading sources"
    );
    let sources = Sources::load(&config.ucd_dir)?;
    let tables = compile(&sources, config)?;
    let artifacts = render(&tables)?;
    write_artifacts(&config.out_dir, &artifacts)
}

pub fn compile(sources: &Sources, config: &Config) -> Result<Tables> {
    let mut db = Aggregator::new(config.defaults).apply_all(sources)?;
    idna::resolve(&mut db, config.idna_valid_override)?;

    let layout = RecordLayout::new();
    let mut records = Interner::new("property records", RECORD_LIMIT);
    let mut values = Vec::with_capacity(db.records.len());
    for record in &db.records {
        values.push(records.intern(&layout.pack(record)?)?);
    }
    tracing::info!(target: "ucd", records = records.len(), "interned property records");
    let props = build_trie("property trie", &values, config.tries.properties)?;

    let decompositions = DecompositionTable::build(&db.decompositions)?;
    let decomposition_trie =
        build_trie("decomposition trie", &decompositions.offsets, config.tries.decompositions)?;
    let ligatures = LigatureTable::build(&db)?;
    let ligature_trie =
        build_trie("ligature trie", &ligatures.combiners, config.tries.ligatures)?;
    let idna = IdnaTable::build(&db.idna_mappings)?;

    Ok(Tables {
        layout,
        records: records.into_values(),
        props,
        special_cases: db.special_cases.into_values(),
        decompositions,
        decomposition_trie,
        ligatures,
        ligature_trie,
        corrections: db.corrections,
        idna,
    })
}

fn build_trie(what: &'static str, values: &[u32], config: TrieConfig) -> Result<Trie> {
    let trie = Trie::build(values, config);
    trie.check_widths(what)?;

    // Sanity check: the trie must reproduce every input value.
    for (cp, &expected) in values.iter().enumerate() {
        if trie.lookup(cp as u32) != expected {
            return Err(Error::invariant(cp as u32, format!("{what} lookup mismatch")));
        }
    }

    tracing::info!(
        target: "ucd",
        table = what,
        unique_blocks = trie.unique_blocks,
        bytes = trie.size(),
        "built trie"
    );
    Ok(trie)
}

pub fn render(tables: &Tables) -> Result<Artifacts> {
    Ok(Artifacts {
        types: emit::render_types(&tables.layout),
        tables: emit::render_tables(tables)?,
    })
}

/// Stages both files next to their destination, then renames them into place.
pub fn write_artifacts(out_dir: &Path, artifacts: &Artifacts) -> Result<()> {
    fs::create_dir_all(out_dir).map_err(|source| io_error(out_dir, source))?;

    let mut staged = Vec::new();
    for (name, text) in [(TYPES_FILE, &artifacts.types), (TABLES_FILE, &artifacts.tables)] {
        let temp = out_dir.join(format!(".{name}.tmp"));
        if let Err(source) = fs::write(&temp, text) {
            discard(&staged);
            return Err(io_error(&temp, source));
        }
        staged.push((temp, out_dir.join(name), text.len()));
    }

    for (temp, path, bytes) in &staged {
        fs::rename(temp, path).map_err(|source| io_error(path, source))?;
        tracing::info!(target: "ucd", path = %path.display(), bytes, "wrote");
    }
    Ok(())
}

fn discard(staged: &[(PathBuf, PathBuf, usize)]) {
    for (temp, _, _) in staged {
        _ = fs::remove_file(temp);
    }
}

fn io_error(path: &Path, source: std::io::Error) -> Error {
    Error::Io { path: path.to_path_buf(), source }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TrieConfigs;
    use crate::names::*;
    use crate::record::PropertyRecord;
    use crate::sources::InputFile;
    use crate::trie::CODEPOINT_COUNT;

    const FIXTURE: &[(InputFile, &str)] = &[
        (
            InputFile::UnicodeData,
            "\
0020;SPACE;Zs;0;WS;;;;;N;;;;;
0028;LEFT PARENTHESIS;Ps;0;ON;;;;;Y;OPENING PARENTHESIS;;;;
0029;RIGHT PARENTHESIS;Pe;0;ON;;;;;Y;CLOSING PARENTHESIS;;;;
0031;DIGIT ONE;Nd;0;EN;;1;1;1;N;;;;;
0041;LATIN CAPITAL LETTER A;Lu;0;L;;;;;N;;;;0061;
0061;LATIN SMALL LETTER A;Ll;0;L;;;;;N;;;0041;;0041
00C0;LATIN CAPITAL LETTER A WITH GRAVE;Lu;0;L;0041 0300;;;;N;;;;00E0;
00DF;LATIN SMALL LETTER SHARP S;Ll;0;L;;;;;N;;;;;
00E0;LATIN SMALL LETTER A WITH GRAVE;Ll;0;L;0061 0300;;;;N;;;00C0;;00C0
0300;COMBINING GRAVE ACCENT;Mn;230;NSM;;;;;N;;;;;
0628;ARABIC LETTER BEH;Lo;0;AL;;;;;N;;;;;
4E00;<CJK Ideograph, First>;Lo;0;L;;;;;N;;;;;
9FFF;<CJK Ideograph, Last>;Lo;0;L;;;;;N;;;;;
",
        ),
        (InputFile::DerivedCombiningClass, "0300..0301 ; 230 # Mn\n"),
        (InputFile::ArabicShaping, "0628; BEH; D; BEH\n"),
        (InputFile::BidiMirroring, "0028; 0029 # LEFT PARENTHESIS\n0029; 0028\n"),
        (InputFile::SpecialCasing, "00DF; 00DF; 0053 0073; 0053 0053; # SHARP S\n"),
        (InputFile::CaseFolding, "0041; C; 0061;\n00C0; C; 00E0;\n00DF; F; 0073 0073;\n"),
        (InputFile::DerivedAge, "0000..00FF    ; 1.1\n0300 ; 1.1\n4E00..9FA5 ; 1.1\n"),
        (InputFile::EastAsianWidth, "0020..007E ; Na\n4E00..9FFF ; W\n"),
        (InputFile::Scripts, "0041..005A ; Latin\n0061..007A ; Latin\n0300 ; Inherited\n"),
        (InputFile::GraphemeBreakProperty, "0300..036F ; Extend\n"),
        (InputFile::WordBreakProperty, "0041..005A ; ALetter\n0061..007A ; ALetter\n"),
        (InputFile::SentenceBreakProperty, "0041..005A ; Upper\n0061..007A ; Lower\n"),
        (InputFile::LineBreak, "0020;SP\n0041..005A;AL\n4E00..9FFF;ID\n"),
        (
            InputFile::DerivedNormalizationProps,
            "0300 ; NFC_QC; M\n0340..0341 ; Full_Composition_Exclusion\n",
        ),
        (InputFile::NormalizationCorrections, "F951;96FB;964B;3.2.0 # Corrigendum 3\n"),
        (
            InputFile::IdnaMappingTable,
            "\
0000..002C    ; disallowed_STD3_valid
002D..002E    ; valid
0030..0039    ; valid
0041          ; mapped                 ; 0061
005F          ; disallowed_STD3_valid
0061..007A    ; valid
00C0          ; mapped                 ; 00E0
00DF          ; deviation              ; 0073 0073
00E0          ; valid
2488          ; disallowed_STD3_mapped ; 0031 002E
2493          ; disallowed_STD3_mapped ; 0032 0030 002E
",
        ),
    ];

    fn fixture_dir(overrides: &[(InputFile, &str)]) -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        for &(file, text) in FIXTURE {
            let text = overrides.iter().find(|(f, _)| *f == file).map_or(text, |&(_, t)| t);
            let path = dir.path().join(file.path());
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, text).unwrap();
        }
        dir
    }

    fn config(ucd: &Path, out: &Path) -> Config {
        Config { ucd_dir: ucd.to_path_buf(), out_dir: out.to_path_buf(), ..Config::default() }
    }

    #[test]
    fn test_compile() {
        let ucd = fixture_dir(&[]);
        let sources = Sources::load(ucd.path()).unwrap();
        let tables = compile(&sources, &Config::default()).unwrap();

        let record = |cp: u32| tables.records[tables.props.lookup(cp) as usize];
        let layout = &tables.layout;
        assert_eq!(
            layout.props.unpack(record(0x41).props, 0),
            GeneralCategory::UppercaseLetter.index()
        );
        assert_eq!(layout.props.unpack(record(0x5F).props, 5), IdnaStatus::Valid.index());
        assert_eq!(layout.props.unpack(record(0x2488).props, 5), IdnaStatus::Mapped.index());
        assert_eq!(layout.breaks.unpack(record(0x7000).breaks, 3), LineBreak::ID.index());
        assert_eq!(record(0x28).mirror, 1);
        assert_eq!(record(0x300).combining_class, 230);
        assert!(tables.records.len() < 64);

        assert_eq!(tables.ligatures.compose(0x41, 0x300), Some(0xC0));
        assert_eq!(tables.ligatures.compose(0x61, 0x300), Some(0xE0));
        assert_eq!(tables.decompositions.get(0xE0).map(|(_, cps)| cps), Some(&[0x61, 0x300][..]));
        assert_eq!(tables.idna.lookup(0x2493), Some(&[0x32, 0x30, 0x2E][..]));
        assert_eq!(tables.special_cases, [vec![0x53, 0x73], vec![0x53, 0x53], vec![0x73, 0x73]]);
        assert_eq!(tables.corrections.len(), 1);
    }

    #[test]
    fn test_shared_record_is_interned_once() {
        let layout = RecordLayout::new();
        let shared =
            PropertyRecord { category: GeneralCategory::OtherLetter, ..PropertyRecord::UNASSIGNED };
        let shared_range = 0x4E00..0x4E00 + 10_000;

        let mut records = Interner::new("property records", RECORD_LIMIT);
        let mut values = Vec::with_capacity(CODEPOINT_COUNT);
        for cp in 0..CODEPOINT_COUNT as u32 {
            let record = if shared_range.contains(&cp) {
                shared
            } else {
                PropertyRecord { combining_class: (cp % 7) as u8, ..PropertyRecord::UNASSIGNED }
            };
            values.push(records.intern(&layout.pack(&record).unwrap()).unwrap());
        }
        let trie = build_trie("property trie", &values, TrieConfigs::DEFAULT.properties).unwrap();

        let packed = layout.pack(&shared).unwrap();
        assert_eq!(records.values().iter().filter(|&&r| r == packed).count(), 1);
        assert_eq!(records.len(), 8);
        let index = values[0x4E00];
        let hits = (0..CODEPOINT_COUNT as u32).filter(|&cp| trie.lookup(cp) == index).count();
        assert_eq!(hits, 10_000);
    }

    #[test]
    fn test_run_writes_both_files_deterministically() {
        let ucd = fixture_dir(&[]);
        let out = tempfile::tempdir().unwrap();
        let out_dir = out.path().join("generated");
        let config = config(ucd.path(), &out_dir);

        run(&config).unwrap();
        let types = fs::read_to_string(out_dir.join(TYPES_FILE)).unwrap();
        let tables = fs::read_to_string(out_dir.join(TABLES_FILE)).unwrap();
        assert!(types.contains("pub struct CharProps {"));
        assert!(tables.contains("pub fn char_props(cp: char) -> &'static CharProps {"));
        assert!(
            tables.contains("pub fn compose(starter: char, combining: char) -> Option<char> {")
        );
        assert!(tables.contains(
            "codepoint: '\\u{f951}', original: &['\\u{96fb}'], corrected: &['\\u{964b}'], version: \"3.2.0\""
        ));

        run(&config).unwrap();
        assert_eq!(fs::read_to_string(out_dir.join(TYPES_FILE)).unwrap(), types);
        assert_eq!(fs::read_to_string(out_dir.join(TABLES_FILE)).unwrap(), tables);

        let leftovers: Vec<_> = fs::read_dir(&out_dir)
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .filter(|name| name.to_string_lossy().ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[test]
    fn test_conflict_writes_nothing() {
        let ucd = fixture_dir(&[(InputFile::DerivedCombiningClass, "0300 ; 220\n")]);
        let out = tempfile::tempdir().unwrap();
        fs::write(out.path().join(TABLES_FILE), "previous").unwrap();

        match run(&config(ucd.path(), out.path())) {
            Err(Error::OverlapConflict { file, line, codepoint, .. }) => {
                assert_eq!(file, "extracted/DerivedCombiningClass.txt");
                assert_eq!(line, 1);
                assert_eq!(codepoint, 0x300);
            }
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(fs::read_to_string(out.path().join(TABLES_FILE)).unwrap(), "previous");
        assert!(!out.path().join(TYPES_FILE).exists());
    }

    #[test]
    fn test_missing_input() {
        let ucd = fixture_dir(&[]);
        fs::remove_file(ucd.path().join("idna/IdnaMappingTable.txt")).unwrap();
        let out = tempfile::tempdir().unwrap();
        match run(&config(ucd.path(), out.path())) {
            Err(Error::MissingInputFile { path }) => {
                assert!(path.ends_with("IdnaMappingTable.txt"))
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_unknown_value_is_fatal() {
        let ucd = fixture_dir(&[(InputFile::Scripts, "0041 ; Klingon\n")]);
        let sources = Sources::load(ucd.path()).unwrap();
        match compile(&sources, &Config::default()) {
            Err(Error::UnknownEnumValue { file, property, value, .. }) => {
                assert_eq!((file, property, value.as_str()), ("Scripts.txt", "Script", "Klingon"));
            }
            Err(other) => panic!("unexpected {other}"),
            Ok(_) => panic!("expected an error"),
        }
    }
}
