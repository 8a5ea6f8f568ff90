// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Static name tables for every enumerated property.
//!
//! The discriminant order of each enum is the order its values get emitted
//! in, so appending is fine but reordering changes the generated tables.

macro_rules! property_enum {
    (
        $(#[$meta:meta])*
        $name:ident($property:literal) {
            $($variant:ident = $($alias:literal)|+,)*
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[repr(u8)]
        pub enum $name {
            $($variant,)*
        }

        impl $name {
            pub const PROPERTY: &'static str = $property;
            pub const ALL: &'static [Self] = &[$(Self::$variant,)*];

            pub fn from_name(name: &str) -> Option<Self> {
                match name {
                    $($($alias)|+ => Some(Self::$variant),)*
                    _ => None,
                }
            }

            /// The identifier used for this value in generated code.
            pub fn ident(self) -> &'static str {
                match self {
                    $(Self::$variant => stringify!($variant),)*
                }
            }

            pub fn index(self) -> u32 {
                self as u32
            }
        }
    };
}

property_enum! {
    GeneralCategory("General_Category") {
        Unassigned = "Cn",
        UppercaseLetter = "Lu",
        LowercaseLetter = "Ll",
        TitlecaseLetter = "Lt",
        ModifierLetter = "Lm",
        OtherLetter = "Lo",
        NonspacingMark = "Mn",
        SpacingMark = "Mc",
        EnclosingMark = "Me",
        DecimalNumber = "Nd",
        LetterNumber = "Nl",
        OtherNumber = "No",
        ConnectorPunctuation = "Pc",
        DashPunctuation = "Pd",
        OpenPunctuation = "Ps",
        ClosePunctuation = "Pe",
        InitialPunctuation = "Pi",
        FinalPunctuation = "Pf",
        OtherPunctuation = "Po",
        MathSymbol = "Sm",
        CurrencySymbol = "Sc",
        ModifierSymbol = "Sk",
        OtherSymbol = "So",
        SpaceSeparator = "Zs",
        LineSeparator = "Zl",
        ParagraphSeparator = "Zp",
        Control = "Cc",
        Format = "Cf",
        Surrogate = "Cs",
        PrivateUse = "Co",
    }
}

property_enum! {
    BidiClass("Bidi_Class") {
        LeftToRight = "L",
        RightToLeft = "R",
        ArabicLetter = "AL",
        EuropeanNumber = "EN",
        EuropeanSeparator = "ES",
        EuropeanTerminator = "ET",
        ArabicNumber = "AN",
        CommonSeparator = "CS",
        NonspacingMark = "NSM",
        BoundaryNeutral = "BN",
        ParagraphSeparator = "B",
        SegmentSeparator = "S",
        WhiteSpace = "WS",
        OtherNeutral = "ON",
        LeftToRightEmbedding = "LRE",
        LeftToRightOverride = "LRO",
        RightToLeftEmbedding = "RLE",
        RightToLeftOverride = "RLO",
        PopDirectionalFormat = "PDF",
        LeftToRightIsolate = "LRI",
        RightToLeftIsolate = "RLI",
        FirstStrongIsolate = "FSI",
        PopDirectionalIsolate = "PDI",
    }
}

property_enum! {
    JoiningType("Joining_Type") {
        NonJoining = "U",
        JoinCausing = "C",
        DualJoining = "D",
        LeftJoining = "L",
        RightJoining = "R",
        Transparent = "T",
    }
}

property_enum! {
    EastAsianWidth("East_Asian_Width") {
        Neutral = "N",
        Ambiguous = "A",
        Fullwidth = "F",
        Halfwidth = "H",
        Narrow = "Na",
        Wide = "W",
    }
}

property_enum! {
    /// Unicode version that first assigned a codepoint.
    Age("Age") {
        Unassigned = "NA",
        V1_1 = "1.1",
        V2_0 = "2.0",
        V2_1 = "2.1",
        V3_0 = "3.0",
        V3_1 = "3.1",
        V3_2 = "3.2",
        V4_0 = "4.0",
        V4_1 = "4.1",
        V5_0 = "5.0",
        V5_1 = "5.1",
        V5_2 = "5.2",
        V6_0 = "6.0",
        V6_1 = "6.1",
        V6_2 = "6.2",
        V6_3 = "6.3",
        V7_0 = "7.0",
        V8_0 = "8.0",
        V9_0 = "9.0",
        V10_0 = "10.0",
        V11_0 = "11.0",
        V12_0 = "12.0",
        V12_1 = "12.1",
        V13_0 = "13.0",
        V14_0 = "14.0",
        V15_0 = "15.0",
        V15_1 = "15.1",
        V16_0 = "16.0",
    }
}

property_enum! {
    #[allow(clippy::upper_case_acronyms)]
    GraphemeBreak("Grapheme_Cluster_Break") {
        Other = "Other" | "XX",
        CR = "CR",
        LF = "LF",
        Control = "Control" | "CN",
        Extend = "Extend" | "EX",
        ZWJ = "ZWJ",
        RegionalIndicator = "Regional_Indicator" | "RI",
        Prepend = "Prepend" | "PP",
        SpacingMark = "SpacingMark" | "SM",
        L = "L",
        V = "V",
        T = "T",
        LV = "LV",
        LVT = "LVT",
    }
}

property_enum! {
    #[allow(clippy::upper_case_acronyms)]
    WordBreak("Word_Break") {
        Other = "Other" | "XX",
        CR = "CR",
        LF = "LF",
        Newline = "Newline" | "NL",
        Extend = "Extend",
        ZWJ = "ZWJ",
        RegionalIndicator = "Regional_Indicator" | "RI",
        Format = "Format" | "FO",
        Katakana = "Katakana" | "KA",
        HebrewLetter = "Hebrew_Letter" | "HL",
        ALetter = "ALetter" | "LE",
        SingleQuote = "Single_Quote" | "SQ",
        DoubleQuote = "Double_Quote" | "DQ",
        MidNumLet = "MidNumLet" | "MB",
        MidLetter = "MidLetter" | "ML",
        MidNum = "MidNum" | "MN",
        Numeric = "Numeric" | "NU",
        ExtendNumLet = "ExtendNumLet" | "EX",
        WSegSpace = "WSegSpace",
    }
}

property_enum! {
    #[allow(clippy::upper_case_acronyms)]
    SentenceBreak("Sentence_Break") {
        Other = "Other" | "XX",
        CR = "CR",
        LF = "LF",
        Extend = "Extend" | "EX",
        Sep = "Sep" | "SE",
        Format = "Format" | "FO",
        Sp = "Sp",
        Lower = "Lower" | "LO",
        Upper = "Upper" | "UP",
        OLetter = "OLetter" | "LE",
        Numeric = "Numeric" | "NU",
        ATerm = "ATerm" | "AT",
        SContinue = "SContinue" | "SC",
        STerm = "STerm" | "ST",
        Close = "Close" | "CL",
    }
}

property_enum! {
    #[allow(clippy::upper_case_acronyms)]
    LineBreak("Line_Break") {
        AL = "AL",
        AI = "AI",
        AK = "AK",
        AP = "AP",
        AS = "AS",
        B2 = "B2",
        BA = "BA",
        BB = "BB",
        BK = "BK",
        CB = "CB",
        CJ = "CJ",
        CL = "CL",
        CM = "CM",
        CP = "CP",
        CR = "CR",
        EB = "EB",
        EM = "EM",
        EX = "EX",
        GL = "GL",
        H2 = "H2",
        H3 = "H3",
        HL = "HL",
        HY = "HY",
        ID = "ID",
        IN = "IN",
        IS = "IS",
        JL = "JL",
        JT = "JT",
        JV = "JV",
        LF = "LF",
        NL = "NL",
        NS = "NS",
        NU = "NU",
        OP = "OP",
        PO = "PO",
        PR = "PR",
        QU = "QU",
        RI = "RI",
        SA = "SA",
        SG = "SG",
        SP = "SP",
        SY = "SY",
        VF = "VF",
        VI = "VI",
        WJ = "WJ",
        XX = "XX",
        ZW = "ZW",
        ZWJ = "ZWJ",
    }
}

property_enum! {
    Script("Script") {
        Unknown = "Unknown" | "Zzzz",
        Common = "Common" | "Zyyy",
        Inherited = "Inherited" | "Zinh",
        Adlam = "Adlam",
        Ahom = "Ahom",
        AnatolianHieroglyphs = "Anatolian_Hieroglyphs",
        Arabic = "Arabic",
        Armenian = "Armenian",
        Avestan = "Avestan",
        Balinese = "Balinese",
        Bamum = "Bamum",
        BassaVah = "Bassa_Vah",
        Batak = "Batak",
        Bengali = "Bengali",
        Bhaiksuki = "Bhaiksuki",
        Bopomofo = "Bopomofo",
        Brahmi = "Brahmi",
        Braille = "Braille",
        Buginese = "Buginese",
        Buhid = "Buhid",
        CanadianAboriginal = "Canadian_Aboriginal",
        Carian = "Carian",
        CaucasianAlbanian = "Caucasian_Albanian",
        Chakma = "Chakma",
        Cham = "Cham",
        Cherokee = "Cherokee",
        Chorasmian = "Chorasmian",
        Coptic = "Coptic",
        Cuneiform = "Cuneiform",
        Cypriot = "Cypriot",
        CyproMinoan = "Cypro_Minoan",
        Cyrillic = "Cyrillic",
        Deseret = "Deseret",
        Devanagari = "Devanagari",
        DivesAkuru = "Dives_Akuru",
        Dogra = "Dogra",
        Duployan = "Duployan",
        EgyptianHieroglyphs = "Egyptian_Hieroglyphs",
        Elbasan = "Elbasan",
        Elymaic = "Elymaic",
        Ethiopic = "Ethiopic",
        Garay = "Garay",
        Georgian = "Georgian",
        Glagolitic = "Glagolitic",
        Gothic = "Gothic",
        Grantha = "Grantha",
        Greek = "Greek",
        Gujarati = "Gujarati",
        GunjalaGondi = "Gunjala_Gondi",
        Gurmukhi = "Gurmukhi",
        GurungKhema = "Gurung_Khema",
        Han = "Han",
        Hangul = "Hangul",
        HanifiRohingya = "Hanifi_Rohingya",
        Hanunoo = "Hanunoo",
        Hatran = "Hatran",
        Hebrew = "Hebrew",
        Hiragana = "Hiragana",
        ImperialAramaic = "Imperial_Aramaic",
        InscriptionalPahlavi = "Inscriptional_Pahlavi",
        InscriptionalParthian = "Inscriptional_Parthian",
        Javanese = "Javanese",
        Kaithi = "Kaithi",
        Kannada = "Kannada",
        Katakana = "Katakana",
        Kawi = "Kawi",
        KayahLi = "Kayah_Li",
        Kharoshthi = "Kharoshthi",
        KhitanSmallScript = "Khitan_Small_Script",
        Khmer = "Khmer",
        Khojki = "Khojki",
        Khudawadi = "Khudawadi",
        KiratRai = "Kirat_Rai",
        Lao = "Lao",
        Latin = "Latin",
        Lepcha = "Lepcha",
        Limbu = "Limbu",
        LinearA = "Linear_A",
        LinearB = "Linear_B",
        Lisu = "Lisu",
        Lycian = "Lycian",
        Lydian = "Lydian",
        Mahajani = "Mahajani",
        Makasar = "Makasar",
        Malayalam = "Malayalam",
        Mandaic = "Mandaic",
        Manichaean = "Manichaean",
        Marchen = "Marchen",
        MasaramGondi = "Masaram_Gondi",
        Medefaidrin = "Medefaidrin",
        MeeteiMayek = "Meetei_Mayek",
        MendeKikakui = "Mende_Kikakui",
        MeroiticCursive = "Meroitic_Cursive",
        MeroiticHieroglyphs = "Meroitic_Hieroglyphs",
        Miao = "Miao",
        Modi = "Modi",
        Mongolian = "Mongolian",
        Mro = "Mro",
        Multani = "Multani",
        Myanmar = "Myanmar",
        Nabataean = "Nabataean",
        NagMundari = "Nag_Mundari",
        Nandinagari = "Nandinagari",
        NewTaiLue = "New_Tai_Lue",
        Newa = "Newa",
        Nko = "Nko",
        Nushu = "Nushu",
        NyiakengPuachueHmong = "Nyiakeng_Puachue_Hmong",
        Ogham = "Ogham",
        OlChiki = "Ol_Chiki",
        OlOnal = "Ol_Onal",
        OldHungarian = "Old_Hungarian",
        OldItalic = "Old_Italic",
        OldNorthArabian = "Old_North_Arabian",
        OldPermic = "Old_Permic",
        OldPersian = "Old_Persian",
        OldSogdian = "Old_Sogdian",
        OldSouthArabian = "Old_South_Arabian",
        OldTurkic = "Old_Turkic",
        OldUyghur = "Old_Uyghur",
        Oriya = "Oriya",
        Osage = "Osage",
        Osmanya = "Osmanya",
        PahawhHmong = "Pahawh_Hmong",
        Palmyrene = "Palmyrene",
        PauCinHau = "Pau_Cin_Hau",
        PhagsPa = "Phags_Pa",
        Phoenician = "Phoenician",
        PsalterPahlavi = "Psalter_Pahlavi",
        Rejang = "Rejang",
        Runic = "Runic",
        Samaritan = "Samaritan",
        Saurashtra = "Saurashtra",
        Sharada = "Sharada",
        Shavian = "Shavian",
        Siddham = "Siddham",
        SignWriting = "SignWriting",
        Sinhala = "Sinhala",
        Sogdian = "Sogdian",
        SoraSompeng = "Sora_Sompeng",
        Soyombo = "Soyombo",
        Sundanese = "Sundanese",
        Sunuwar = "Sunuwar",
        SylotiNagri = "Syloti_Nagri",
        Syriac = "Syriac",
        Tagalog = "Tagalog",
        Tagbanwa = "Tagbanwa",
        TaiLe = "Tai_Le",
        TaiTham = "Tai_Tham",
        TaiViet = "Tai_Viet",
        Takri = "Takri",
        Tamil = "Tamil",
        Tangsa = "Tangsa",
        Tangut = "Tangut",
        Telugu = "Telugu",
        Thaana = "Thaana",
        Thai = "Thai",
        Tibetan = "Tibetan",
        Tifinagh = "Tifinagh",
        Tirhuta = "Tirhuta",
        Todhri = "Todhri",
        Toto = "Toto",
        TuluTigalari = "Tulu_Tigalari",
        Ugaritic = "Ugaritic",
        Vai = "Vai",
        Vithkuqi = "Vithkuqi",
        Wancho = "Wancho",
        WarangCiti = "Warang_Citi",
        Yezidi = "Yezidi",
        Yi = "Yi",
        ZanabazarSquare = "Zanabazar_Square",
    }
}

property_enum! {
    /// `Canonical` decompositions carry no tag in UnicodeData.txt.
    DecompositionTag("Decomposition_Type") {
        Canonical = "",
        Font = "<font>",
        NoBreak = "<noBreak>",
        Initial = "<initial>",
        Medial = "<medial>",
        Final = "<final>",
        Isolated = "<isolated>",
        Circle = "<circle>",
        Super = "<super>",
        Sub = "<sub>",
        Vertical = "<vertical>",
        Wide = "<wide>",
        Narrow = "<narrow>",
        Small = "<small>",
        Square = "<square>",
        Fraction = "<fraction>",
        Compat = "<compat>",
    }
}

property_enum! {
    /// Status as written in IdnaMappingTable.txt.
    IdnaRawStatus("IDNA_Status") {
        Disallowed = "disallowed",
        Valid = "valid",
        Ignored = "ignored",
        Mapped = "mapped",
        Deviation = "deviation",
        DisallowedStd3Valid = "disallowed_STD3_valid",
        DisallowedStd3Mapped = "disallowed_STD3_mapped",
    }
}

property_enum! {
    /// Status after resolution; this is what the runtime sees.
    IdnaStatus("IDNA_Status") {
        Disallowed = "disallowed",
        Valid = "valid",
        Ignored = "ignored",
        Mapped = "mapped",
        Deviation = "deviation",
    }
}

property_enum! {
    QuickCheckValue("Quick_Check") {
        Yes = "Y",
        No = "N",
        Maybe = "M",
    }
}
