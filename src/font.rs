use crate::{
    refs::{ObjectRefs, RefType},
    Pt,
};
use pdf_writer::{Name, Pdf};

/// The PDF base-14 fonts the cards are set in. These are guaranteed to be
/// available in every conforming reader, so nothing is embedded: only the
/// glyph widths are carried here so text can be measured and centred.
///
/// Text is encoded with `WinAnsiEncoding`, which covers ASCII, Latin-1 and a
/// handful of typographic characters. Anything else is drawn as `?`.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum BuiltinFont {
    Helvetica,
    HelveticaBold,
}

const ELLIPSIS: char = '\u{2026}';

/// Widths of the printable ASCII range (0x20..=0x7E) in 1/1000 em, from the Adobe AFM files
#[rustfmt::skip]
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

#[rustfmt::skip]
const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

/// The WinAnsi code points 0x80..=0x9F that differ from Latin-1
const WIN_ANSI_HIGH: [(char, u8); 27] = [
    ('\u{20AC}', 0x80),
    ('\u{201A}', 0x82),
    ('\u{0192}', 0x83),
    ('\u{201E}', 0x84),
    ('\u{2026}', 0x85),
    ('\u{2020}', 0x86),
    ('\u{2021}', 0x87),
    ('\u{02C6}', 0x88),
    ('\u{2030}', 0x89),
    ('\u{0160}', 0x8A),
    ('\u{2039}', 0x8B),
    ('\u{0152}', 0x8C),
    ('\u{017D}', 0x8E),
    ('\u{2018}', 0x91),
    ('\u{2019}', 0x92),
    ('\u{201C}', 0x93),
    ('\u{201D}', 0x94),
    ('\u{2022}', 0x95),
    ('\u{2013}', 0x96),
    ('\u{2014}', 0x97),
    ('\u{02DC}', 0x98),
    ('\u{2122}', 0x99),
    ('\u{0161}', 0x9A),
    ('\u{203A}', 0x9B),
    ('\u{0153}', 0x9C),
    ('\u{017E}', 0x9E),
    ('\u{0178}', 0x9F),
];

impl BuiltinFont {
    /// Every font a document may reference; pages declare all of them as resources
    pub const ALL: [BuiltinFont; 2] = [BuiltinFont::Helvetica, BuiltinFont::HelveticaBold];

    /// The PostScript name of the font
    pub fn base_font(&self) -> &'static str {
        match self {
            BuiltinFont::Helvetica => "Helvetica",
            BuiltinFont::HelveticaBold => "Helvetica-Bold",
        }
    }

    /// Index of the font within [BuiltinFont::ALL], used for the `/F{index}` resource name
    pub fn index(&self) -> usize {
        match self {
            BuiltinFont::Helvetica => 0,
            BuiltinFont::HelveticaBold => 1,
        }
    }

    /// Calculate the ascent (distance from the baseline to the top of the font) for the given font size
    pub fn ascent(&self, size: Pt) -> Pt {
        size * 0.718
    }

    /// Calculate the descent for the given font size. Note: this is negative
    pub fn descent(&self, size: Pt) -> Pt {
        size * -0.207
    }

    fn ascii_widths(&self) -> &'static [u16; 95] {
        match self {
            BuiltinFont::Helvetica => &HELVETICA_WIDTHS,
            BuiltinFont::HelveticaBold => &HELVETICA_BOLD_WIDTHS,
        }
    }

    /// Advance width of a single character in 1/1000 em. Accented Latin-1
    /// letters are measured as their base letter.
    fn char_width(&self, ch: char) -> u16 {
        let ch = width_proxy(ch);
        match ch {
            ' '..='~' => self.ascii_widths()[ch as usize - 0x20],
            'ß' => 611,
            _ => 556,
        }
    }

    /// Calculate the width of a given string of text at the given font size
    pub fn width_of_text(&self, text: &str, size: Pt) -> Pt {
        let units: u32 = text
            .chars()
            .map(|ch| self.char_width(if is_encodable(ch) { ch } else { '?' }) as u32)
            .sum();
        size * (units as f32 / 1000.0)
    }

    /// Font size at which `text` is no wider than `max_width`, never above `size`
    pub fn size_to_fit(&self, text: &str, size: Pt, max_width: Pt) -> Pt {
        let width = self.width_of_text(text, size);
        if width <= max_width || width.0 <= 0.0 {
            size
        } else {
            size * (max_width.0 / width.0)
        }
    }

    /// `text` shortened with a trailing ellipsis until it fits `max_width`
    pub fn truncate_to_fit(&self, text: &str, size: Pt, max_width: Pt) -> String {
        if self.width_of_text(text, size) <= max_width {
            return text.to_string();
        }
        let mut chars: Vec<char> = text.chars().collect();
        while chars.pop().is_some() {
            let candidate: String = chars.iter().chain(std::iter::once(&ELLIPSIS)).collect();
            if self.width_of_text(&candidate, size) <= max_width {
                return candidate;
            }
        }
        String::new()
    }

    pub(crate) fn write(&self, refs: &mut ObjectRefs, writer: &mut Pdf) {
        let id = refs.alloc(RefType::Font(self.index()));
        let mut font = writer.type1_font(id);
        font.base_font(Name(self.base_font().as_bytes()));
        font.encoding_predefined(Name(b"WinAnsiEncoding"));
    }
}

/// Whether the character has a code in `WinAnsiEncoding`
pub fn is_encodable(ch: char) -> bool {
    encode_char(ch).is_some()
}

fn encode_char(ch: char) -> Option<u8> {
    match ch {
        ' '..='~' => Some(ch as u8),
        '\u{A0}'..='\u{FF}' => Some(ch as u32 as u8),
        _ => WIN_ANSI_HIGH
            .iter()
            .find(|(c, _)| *c == ch)
            .map(|&(_, code)| code),
    }
}

/// Encode text as `WinAnsiEncoding` bytes, replacing anything unencodable with `?`
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars().map(|ch| encode_char(ch).unwrap_or(b'?')).collect()
}

fn width_proxy(ch: char) -> char {
    match ch {
        'À'..='Å' => 'A',
        'Ç' => 'C',
        'È'..='Ë' => 'E',
        'Ì'..='Ï' => 'I',
        'Ñ' => 'N',
        'Ò'..='Ö' | 'Ø' => 'O',
        'Ù'..='Ü' => 'U',
        'Ý' => 'Y',
        'à'..='å' => 'a',
        'ç' => 'c',
        'è'..='ë' => 'e',
        'ì'..='ï' => 'i',
        'ñ' => 'n',
        'ò'..='ö' | 'ø' => 'o',
        'ù'..='ü' => 'u',
        'ý' | 'ÿ' => 'y',
        '\u{2018}' | '\u{2019}' | '\u{201A}' => '\'',
        '\u{201C}' | '\u{201D}' | '\u{201E}' => '"',
        '\u{2013}' => '-',
        _ => ch,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn measures_ascii_with_afm_widths() {
        // "Hi" = 722 + 222 in Helvetica
        let width = BuiltinFont::Helvetica.width_of_text("Hi", Pt(10.0));
        assert!((width.0 - 9.44).abs() < 1e-4);
        assert!(
            BuiltinFont::HelveticaBold.width_of_text("Hi", Pt(10.0))
                > BuiltinFont::Helvetica.width_of_text("Hi", Pt(10.0))
        );
    }

    #[test]
    fn accented_letters_measure_like_their_base() {
        let font = BuiltinFont::Helvetica;
        assert_eq!(
            font.width_of_text("Käse", Pt(12.0)),
            font.width_of_text("Kase", Pt(12.0))
        );
    }

    #[test]
    fn oversized_text_is_scaled_or_shortened_to_fit() {
        let font = BuiltinFont::HelveticaBold;
        let text = "WWWWWWWWWW";
        let size = font.size_to_fit(text, Pt(10.0), Pt(50.0));
        assert!(size < Pt(10.0));
        assert!(font.width_of_text(text, size) <= Pt(50.001));
        assert_eq!(font.size_to_fit("i", Pt(10.0), Pt(50.0)), Pt(10.0));

        let short = font.truncate_to_fit(text, Pt(10.0), Pt(50.0));
        assert!(short.ends_with('\u{2026}'));
        assert!(font.width_of_text(&short, Pt(10.0)) <= Pt(50.0));
        assert_eq!(font.truncate_to_fit(text, Pt(10.0), Pt(1.0)), "");
    }

    #[test]
    fn encodes_latin1_and_typographic_characters() {
        assert_eq!(encode_win_ansi("Grüße"), vec![b'G', b'r', 0xFC, 0xDF, b'e']);
        assert_eq!(encode_win_ansi("\u{2013}\u{20AC}"), vec![0x96, 0x80]);
        assert_eq!(encode_win_ansi("\u{20BF}"), vec![b'?']);
        assert!(!is_encodable('\u{20BF}'));
    }
}
