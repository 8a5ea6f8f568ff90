// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Renders the compiled tables as Rust source.
//!
//! `ucd_types.rs` holds the declarations, `ucd_tables.rs` the data and the
//! lookup functions. The tables file expects the types file to be its sibling
//! module `ucd_types`.

use std::fmt::Write as _;

use indoc::writedoc;

use crate::apperr::{Error, Result};
use crate::idna::{IdnaTable, Replacement};
use crate::names::*;
use crate::normalization::{Correction, DecompositionTable, LigatureTable};
use crate::packing::{BitPacking, PackedRecord, RecordLayout, SPECIAL_CASE_FLAG};
use crate::trie::{Trie, Width};

const HEADER: &str = "// Generated by ucd-compiler. Do not edit.\n";

/// Everything that goes into the generated files.
pub struct Tables {
    pub layout: RecordLayout,
    pub records: Vec<PackedRecord>,
    pub props: Trie,
    pub special_cases: Vec<Vec<u32>>,
    pub decompositions: DecompositionTable,
    pub decomposition_trie: Trie,
    pub ligatures: LigatureTable,
    pub ligature_trie: Trie,
    pub corrections: Vec<Correction>,
    pub idna: IdnaTable,
}

macro_rules! write_enums {
    ($buf:expr, $($ty:ident),* $(,)?) => {
        $(write_enum($buf, stringify!($ty), $ty::PROPERTY, $ty::ALL.iter().map(|v| v.ident()));)*
    };
}

pub fn render_types(layout: &RecordLayout) -> String {
    let mut buf = String::from(HEADER);

    write_enums!(
        &mut buf,
        GeneralCategory,
        BidiClass,
        JoiningType,
        EastAsianWidth,
        Age,
        GraphemeBreak,
        WordBreak,
        SentenceBreak,
        LineBreak,
        Script,
        DecompositionTag,
        IdnaStatus,
        QuickCheckValue,
    );

    _ = writedoc!(
        buf,
        "

        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        pub enum NormalizationForm {{
            Nfd,
            Nfc,
            Nfkd,
            Nfkc,
        }}

        /// A decoded case field.
        #[derive(Clone, Copy, Debug, PartialEq, Eq)]
        pub enum CaseMapping {{
            /// Maps to the single codepoint `cp + delta`.
            Delta(i32),
            /// Maps to `special_case(index)`.
            Special(u16),
        }}

        impl CaseMapping {{
            #[inline]
            pub const fn decode(field: u16) -> Self {{
                if field & 0x{flag:04x} != 0 {{
                    Self::Special(field & 0x{index_mask:04x})
                }} else {{
                    // Sign-extend the 14-bit delta.
                    Self::Delta(((field << 2) as i16 >> 2) as i32)
                }}
            }}
        }}

        #[derive(Clone, Copy, Debug, PartialEq, Eq)]
        pub struct CharProps {{
            pub props: u32,
            pub breaks: u32,
            pub combining_class: u8,
            pub quick_check: u8,
            pub mirror: i16,
            pub lower: u16,
            pub upper: u16,
            pub title: u16,
            pub fold: u16,
        }}

        impl CharProps {{
        ",
        flag = SPECIAL_CASE_FLAG,
        index_mask = !SPECIAL_CASE_FLAG,
    );
    write_accessors(&mut buf, &layout.props);
    write_accessors(&mut buf, &layout.breaks);
    _ = writedoc!(
        buf,
        "
            #[inline]
            pub fn combining_class(&self) -> u8 {{
                self.combining_class
            }}

            #[inline]
            pub fn quick_check(&self, form: NormalizationForm) -> QuickCheckValue {{
                QuickCheckValue::ALL[((self.quick_check >> (form as u8 * 2)) & 3) as usize]
            }}

            /// `mirror - cp`, 0 if there's no mirrored glyph.
            #[inline]
            pub fn mirror_offset(&self) -> i32 {{
                self.mirror as i32
            }}

            #[inline]
            pub fn lower(&self) -> CaseMapping {{
                CaseMapping::decode(self.lower)
            }}

            #[inline]
            pub fn upper(&self) -> CaseMapping {{
                CaseMapping::decode(self.upper)
            }}

            #[inline]
            pub fn title(&self) -> CaseMapping {{
                CaseMapping::decode(self.title)
            }}

            #[inline]
            pub fn fold(&self) -> CaseMapping {{
                CaseMapping::decode(self.fold)
            }}
        }}

        #[derive(Clone, Copy, Debug, PartialEq, Eq)]
        pub struct SpecialCase {{
            pub offset: u16,
            pub len: u8,
        }}

        /// The compositions with one combining codepoint, sorted by `starter`.
        #[derive(Clone, Copy, Debug, PartialEq, Eq)]
        pub struct LigatureGroup {{
            pub offset: u16,
            pub len: u8,
        }}

        #[derive(Clone, Copy, Debug, PartialEq, Eq)]
        pub struct Ligature {{
            pub starter: char,
            pub composed: char,
        }}

        #[derive(Clone, Copy, Debug, PartialEq, Eq)]
        pub enum IdnaReplacement {{
            Inline {{ len: u8, chars: [char; 2] }},
            /// A span of the shared IDNA superstring.
            Shared {{ offset: u16, len: u8 }},
        }}

        /// Every codepoint in `first..=last` maps to `replacement`.
        #[derive(Clone, Copy, Debug, PartialEq, Eq)]
        pub struct IdnaMapping {{
            pub first: u32,
            pub last: u32,
            pub replacement: IdnaReplacement,
        }}

        #[derive(Clone, Copy, Debug, PartialEq, Eq)]
        pub struct NormalizationCorrection {{
            pub codepoint: char,
            pub original: &'static [char],
            pub corrected: &'static [char],
            pub version: &'static str,
        }}
        ",
    );

    buf
}

fn write_enum<'a>(
    buf: &mut String,
    name: &str,
    property: &str,
    variants: impl ExactSizeIterator<Item = &'a str>,
) {
    let count = variants.len();
    _ = writedoc!(
        buf,
        "

        /// Values of the `{property}` property.
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[repr(u8)]
        pub enum {name} {{
        "
    );
    let mut all = String::new();
    for variant in variants {
        _ = writeln!(buf, "    {variant},");
        _ = write!(all, " Self::{variant},");
    }
    _ = writedoc!(
        buf,
        "
        }}

        impl {name} {{
            #[rustfmt::skip]
            pub const ALL: [Self; {count}] = [{all} ];
        }}
        "
    );
}

fn write_accessors(buf: &mut String, packing: &BitPacking) {
    for field in &packing.fields {
        let (word, name, ty, shift, mask) =
            (packing.word, field.name, field.ty, field.shift, field.mask());
        _ = writeln!(buf, "    #[inline]\n    pub fn {name}(&self) -> {ty} {{");
        if ty == "Option<u8>" {
            _ = writeln!(buf, "        match (self.{word} >> {shift}) & 0x{mask:x} {{");
            _ = writeln!(
                buf,
                "            0 => None,\n            v => Some(v as u8 - 1),\n        }}"
            );
        } else {
            _ = writeln!(
                buf,
                "        {ty}::ALL[((self.{word} >> {shift}) & 0x{mask:x}) as usize]"
            );
        }
        buf.push_str("    }\n\n");
    }
}

pub fn render_tables(tables: &Tables) -> Result<String> {
    let mut buf = String::from(HEADER);
    buf.push_str("\nuse std::cmp::Ordering;\n\nuse super::ucd_types::*;\n\n");

    write_records(&mut buf, &tables.records);
    write_trie(&mut buf, "PROPS", &tables.props);
    _ = writedoc!(
        buf,
        "
        #[inline]
        pub fn char_props(cp: char) -> &'static CharProps {{
            &CHAR_PROPS[props_lookup(cp as u32)]
        }}

        "
    );

    write_special_cases(&mut buf, &tables.special_cases)?;
    write_decompositions(&mut buf, &tables.decompositions, &tables.decomposition_trie);
    write_ligatures(&mut buf, &tables.ligatures, &tables.ligature_trie)?;
    write_corrections(&mut buf, &tables.corrections)?;
    write_idna(&mut buf, &tables.idna)?;

    Ok(buf)
}

fn write_records(buf: &mut String, records: &[PackedRecord]) {
    _ = writeln!(
        buf,
        "#[rustfmt::skip]\npub static CHAR_PROPS: [CharProps; {}] = [",
        records.len()
    );
    for r in records {
        _ = writeln!(
            buf,
            "    CharProps {{ props: 0x{:08x}, breaks: 0x{:08x}, combining_class: {}, quick_check: 0x{:02x}, mirror: {}, lower: 0x{:04x}, upper: 0x{:04x}, title: 0x{:04x}, fold: 0x{:04x} }},",
            r.props,
            r.breaks,
            r.combining_class,
            r.quick_check,
            r.mirror,
            r.lower,
            r.upper,
            r.title,
            r.fold,
        );
    }
    buf.push_str("];\n\n");
}

/// Writes the three trie arrays and a private `{prefix}_lookup(cp) -> usize`.
fn write_trie(buf: &mut String, prefix: &str, trie: &Trie) {
    let c = &trie.config;
    write_array(buf, &format!("{prefix}_BMP"), c.map_width, &trie.bmp_map);
    write_array(buf, &format!("{prefix}_SUPP"), c.map_width, &trie.supp_map);
    write_array(buf, &format!("{prefix}_BLOCKS"), c.value_width, &trie.blocks);

    let lower = prefix.to_ascii_lowercase();
    _ = writedoc!(
        buf,
        "
        #[inline]
        fn {lower}_lookup(cp: u32) -> usize {{
            let (offset, within) = if cp < 0x{boundary:x} {{
                ({prefix}_BMP[(cp >> {bmp_shift}) as usize] as usize, (cp & {bmp_mask}) as usize)
            }} else {{
                let rel = cp - 0x{boundary:x};
                ({prefix}_SUPP[(rel >> {supp_shift}) as usize] as usize, (rel & {supp_mask}) as usize)
            }};
            {prefix}_BLOCKS[offset + within] as usize
        }}

        ",
        boundary = c.boundary,
        bmp_shift = c.bmp_shift,
        bmp_mask = c.bmp_block_size() - 1,
        supp_shift = c.supp_shift,
        supp_mask = c.supp_block_size() - 1,
    );
}

fn write_array(buf: &mut String, name: &str, width: Width, values: &[u32]) {
    let bits = width.bits();
    _ = write!(buf, "#[rustfmt::skip]\nstatic {name}: [u{bits}; {}] = [", values.len());
    for (i, &value) in values.iter().enumerate() {
        if i % 16 == 0 {
            buf.push_str("\n   ");
        }
        _ = write!(buf, " 0x{:01$x},", value, bits / 4);
    }
    buf.push_str("\n];\n");
}

fn write_chars(buf: &mut String, name: &str, codepoints: &[u32]) -> Result<()> {
    _ = write!(buf, "#[rustfmt::skip]\nstatic {name}: [char; {}] = [", codepoints.len());
    for (i, &cp) in codepoints.iter().enumerate() {
        if i % 8 == 0 {
            buf.push_str("\n   ");
        }
        _ = write!(buf, " {},", char_literal(cp)?);
    }
    buf.push_str("\n];\n");
    Ok(())
}

fn char_literal(cp: u32) -> Result<String> {
    match char::from_u32(cp) {
        Some(_) => Ok(format!("'\\u{{{cp:x}}}'")),
        None => Err(Error::invariant(cp, "not a scalar value")),
    }
}

fn char_slice(codepoints: &[u32]) -> Result<String> {
    let chars = codepoints.iter().map(|&cp| char_literal(cp)).collect::<Result<Vec<_>>>()?;
    Ok(format!("&[{}]", chars.join(", ")))
}

fn write_special_cases(buf: &mut String, special_cases: &[Vec<u32>]) -> Result<()> {
    let mut data = Vec::new();
    _ = writeln!(
        buf,
        "#[rustfmt::skip]\npub static SPECIAL_CASES: [SpecialCase; {}] = [",
        special_cases.len()
    );
    for sequence in special_cases {
        Error::check_capacity("special-case data offset", data.len(), 1 << 16)?;
        Error::check_capacity("special-case length", sequence.len(), 1 << 8)?;
        _ = writeln!(buf, "    SpecialCase {{ offset: {}, len: {} }},", data.len(), sequence.len());
        data.extend_from_slice(sequence);
    }
    buf.push_str("];\n");
    write_chars(buf, "SPECIAL_CASE_DATA", &data)?;

    _ = writedoc!(
        buf,
        "

        pub fn special_case(index: u16) -> &'static [char] {{
            let s = SPECIAL_CASES[index as usize];
            &SPECIAL_CASE_DATA[s.offset as usize..s.offset as usize + s.len as usize]
        }}

        /// The full mapping of `cp` under one of its case fields.
        pub fn case_target(cp: char, mapping: CaseMapping) -> CaseTarget {{
            match mapping {{
                CaseMapping::Delta(delta) => {{
                    CaseTarget::Char(char::from_u32((cp as i32 + delta) as u32).unwrap_or(cp))
                }}
                CaseMapping::Special(index) => CaseTarget::Chars(special_case(index)),
            }}
        }}

        #[derive(Clone, Copy, Debug, PartialEq, Eq)]
        pub enum CaseTarget {{
            Char(char),
            Chars(&'static [char]),
        }}

        "
    );
    Ok(())
}

fn write_decompositions(buf: &mut String, table: &DecompositionTable, trie: &Trie) {
    write_trie(buf, "DECOMPOSITION", trie);
    write_array(buf, "DECOMPOSITION_DATA", Width::U32, &table.data);
    _ = writedoc!(
        buf,
        "

        pub fn decomposition(cp: char) -> Option<(DecompositionTag, &'static [u32])> {{
            let offset = decomposition_lookup(cp as u32);
            if offset == 0 {{
                return None;
            }}
            let header = DECOMPOSITION_DATA[offset];
            let len = (header & 0xff) as usize;
            let tag = DecompositionTag::ALL[(header >> 8) as usize];
            Some((tag, &DECOMPOSITION_DATA[offset + 1..offset + 1 + len]))
        }}

        "
    );
}

fn write_ligatures(buf: &mut String, table: &LigatureTable, trie: &Trie) -> Result<()> {
    write_trie(buf, "LIGATURE", trie);

    _ = writeln!(
        buf,
        "#[rustfmt::skip]\npub static LIGATURE_GROUPS: [LigatureGroup; {}] = [",
        table.groups.len()
    );
    for group in &table.groups {
        _ = writeln!(buf, "    LigatureGroup {{ offset: {}, len: {} }},", group.start, group.len());
    }
    buf.push_str("];\n");

    _ = writeln!(
        buf,
        "#[rustfmt::skip]\npub static LIGATURES: [Ligature; {}] = [",
        table.pairs.len()
    );
    for &(starter, composed) in &table.pairs {
        _ = writeln!(
            buf,
            "    Ligature {{ starter: {}, composed: {} }},",
            char_literal(starter)?,
            char_literal(composed)?
        );
    }
    buf.push_str("];\n");

    _ = writedoc!(
        buf,
        "

        /// The canonical composition of `starter` followed by `combining`, if any.
        pub fn compose(starter: char, combining: char) -> Option<char> {{
            let group = ligature_lookup(combining as u32).checked_sub(1)?;
            let g = LIGATURE_GROUPS[group];
            let pairs = &LIGATURES[g.offset as usize..g.offset as usize + g.len as usize];
            let index = pairs.binary_search_by_key(&starter, |l| l.starter).ok()?;
            Some(pairs[index].composed)
        }}

        "
    );
    Ok(())
}

fn write_corrections(buf: &mut String, corrections: &[Correction]) -> Result<()> {
    _ = writeln!(
        buf,
        "pub static NORMALIZATION_CORRECTIONS: [NormalizationCorrection; {}] = [",
        corrections.len()
    );
    for c in corrections {
        _ = writeln!(
            buf,
            "    NormalizationCorrection {{ codepoint: {}, original: {}, corrected: {}, version: {:?} }},",
            char_literal(c.codepoint)?,
            char_slice(&c.original)?,
            char_slice(&c.corrected)?,
            c.version,
        );
    }
    buf.push_str("];\n\n");
    Ok(())
}

fn write_idna(buf: &mut String, table: &IdnaTable) -> Result<()> {
    write_chars(buf, "IDNA_SUPERSTRING", &table.superstring)?;

    _ = writeln!(
        buf,
        "#[rustfmt::skip]\npub static IDNA_MAPPINGS: [IdnaMapping; {}] = [",
        table.entries.len()
    );
    for entry in &table.entries {
        let replacement = match &entry.replacement {
            Replacement::Inline(codepoints) => {
                let mut chars = ["'\\0'".to_string(), "'\\0'".to_string()];
                for (slot, &cp) in chars.iter_mut().zip(codepoints) {
                    *slot = char_literal(cp)?;
                }
                format!(
                    "IdnaReplacement::Inline {{ len: {}, chars: [{}, {}] }}",
                    codepoints.len(),
                    chars[0],
                    chars[1]
                )
            }
            Replacement::Shared(span) => {
                format!("IdnaReplacement::Shared {{ offset: {}, len: {} }}", span.start, span.len())
            }
        };
        _ = writeln!(
            buf,
            "    IdnaMapping {{ first: 0x{:x}, last: 0x{:x}, replacement: {replacement} }},",
            entry.range.start(),
            entry.range.end(),
        );
    }
    buf.push_str("];\n");

    _ = writedoc!(
        buf,
        "

        /// The IDNA replacement of `cp`. Only mapped and deviation codepoints have one.
        pub fn idna_mapping(cp: char) -> Option<&'static [char]> {{
            let cp = cp as u32;
            let index = IDNA_MAPPINGS
                .binary_search_by(|m| {{
                    if m.last < cp {{
                        Ordering::Less
                    }} else if m.first > cp {{
                        Ordering::Greater
                    }} else {{
                        Ordering::Equal
                    }}
                }})
                .ok()?;
            Some(match &IDNA_MAPPINGS[index].replacement {{
                IdnaReplacement::Inline {{ len, chars }} => &chars[..*len as usize],
                IdnaReplacement::Shared {{ offset, len }} => {{
                    &IDNA_SUPERSTRING[*offset as usize..*offset as usize + *len as usize]
                }}
            }})
        }}
        "
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_types_have_accessors_for_every_field() {
        let layout = RecordLayout::new();
        let types = render_types(&layout);
        assert!(types.starts_with(HEADER));
        assert!(
            types.contains("pub enum GeneralCategory {\n    Unassigned,\n    UppercaseLetter,")
        );
        assert!(types.contains("pub const ALL: [Self; 30] = ["));
        for field in layout.props.fields.iter().chain(&layout.breaks.fields) {
            assert!(types.contains(&format!("pub fn {}(&self) -> {}", field.name, field.ty)));
        }
        // general_category is the lowest field of `props`.
        assert!(types.contains("GeneralCategory::ALL[((self.props >> 0) & 0x1f) as usize]"));
        assert!(types.contains("match (self.props >> 24) & 0xf {"));
    }

    #[test]
    fn test_array_layout() {
        let mut buf = String::new();
        let values: Vec<u32> = (0..18).collect();
        write_array(&mut buf, "STAGE", Width::U16, &values);
        let lines: Vec<&str> = buf.lines().collect();
        assert_eq!(lines[0], "#[rustfmt::skip]");
        assert_eq!(lines[1], "static STAGE: [u16; 18] = [");
        assert!(lines[2].starts_with("    0x0000, 0x0001,"));
        assert_eq!(lines[3], "    0x0010, 0x0011,");
        assert_eq!(lines[4], "];");
    }

    #[test]
    fn test_char_literals() {
        assert_eq!(char_literal(0x61).unwrap(), "'\\u{61}'");
        assert_eq!(char_slice(&[0x53, 0x53]).unwrap(), "&['\\u{53}', '\\u{53}']");
        assert!(matches!(char_literal(0xD800), Err(Error::InvariantViolation { .. })));
    }

    #[test]
    fn test_compose_looks_up_the_combining_mark() {
        let mut combiners = vec![0; crate::trie::CODEPOINT_COUNT];
        combiners[0x300] = 1;
        let table = LigatureTable {
            combiners,
            groups: vec![0..2],
            pairs: vec![(0x41, 0xC0), (0x45, 0xC8)],
        };
        let trie = Trie::build(&table.combiners, crate::config::TrieConfigs::DEFAULT.ligatures);
        let mut buf = String::new();
        write_ligatures(&mut buf, &table, &trie).unwrap();
        assert!(buf.contains("    LigatureGroup { offset: 0, len: 2 },"));
        assert!(buf.contains("    Ligature { starter: '\\u{41}', composed: '\\u{c0}' },"));
        assert!(buf.contains("let group = ligature_lookup(combining as u32).checked_sub(1)?;"));
        assert!(buf.contains("pairs.binary_search_by_key(&starter, |l| l.starter)"));
    }

    #[test]
    fn test_idna_entries() {
        use std::collections::BTreeMap;

        let mappings: BTreeMap<u32, Vec<u32>> =
            [(0x41, vec![0x61]), (0x200D, vec![]), (0x2488, vec![0x31, 0x2E, 0x20])]
                .into_iter()
                .collect();
        let table = IdnaTable::build(&mappings).unwrap();
        let mut buf = String::new();
        write_idna(&mut buf, &table).unwrap();
        assert!(buf.contains(
            "IdnaMapping { first: 0x41, last: 0x41, replacement: IdnaReplacement::Inline { len: 1, chars: ['\\u{61}', '\\0'] } },"
        ));
        assert!(
            buf.contains("replacement: IdnaReplacement::Inline { len: 0, chars: ['\\0', '\\0'] }")
        );
        assert!(buf.contains("replacement: IdnaReplacement::Shared { offset: 0, len: 3 }"));
        assert!(buf.contains("static IDNA_SUPERSTRING: [char; 3] = ["));
    }
}
