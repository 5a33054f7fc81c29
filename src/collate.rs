// Vietnamese-alphabet string comparison.
//
// Report rows are sorted by employee name, and the names are Vietnamese, so
// plain codepoint order is wrong (it puts `ă` after `z`). Comparison uses
// the standard Vietnamese alphabet as the primary key, the six tone marks as
// the secondary key, and raw string order as a case tiebreak.
use std::cmp::Ordering;

// One entry per base letter, in alphabet order. Vowel entries list the six
// tone forms in tone order: ngang, huyền, hỏi, ngã, sắc, nặng. The foreign
// letters f, j, w, z keep their Latin slots.
const BASES: &[&str] = &[
    "aàảãáạ",
    "ăằẳẵắặ",
    "âầẩẫấậ",
    "b",
    "c",
    "d",
    "đ",
    "eèẻẽéẹ",
    "êềểễếệ",
    "f",
    "g",
    "h",
    "iìỉĩíị",
    "j",
    "k",
    "l",
    "m",
    "n",
    "oòỏõóọ",
    "ôồổỗốộ",
    "ơờởỡớợ",
    "p",
    "q",
    "r",
    "s",
    "t",
    "uùủũúụ",
    "ưừửữứự",
    "v",
    "w",
    "x",
    "yỳỷỹýỵ",
    "z",
];

/// Collation key of a single character: (base-letter rank, tone rank).
///
/// Characters outside the alphabet (digits, punctuation, non-Vietnamese
/// letters) sort after it, ordered by codepoint.
fn letter_key(c: char) -> (u32, u8) {
    let lower = c.to_lowercase().next().unwrap_or(c);
    for (rank, forms) in BASES.iter().enumerate() {
        if let Some(tone) = forms.chars().position(|f| f == lower) {
            return (rank as u32, tone as u8);
        }
    }
    (BASES.len() as u32 + lower as u32, 0)
}

/// Compare two strings in Vietnamese collation order.
pub fn vietnamese_cmp(a: &str, b: &str) -> Ordering {
    let ka: Vec<(u32, u8)> = a.chars().map(letter_key).collect();
    let kb: Vec<(u32, u8)> = b.chars().map(letter_key).collect();
    match ka.iter().map(|k| k.0).cmp(kb.iter().map(|k| k.0)) {
        Ordering::Equal => {}
        ord => return ord,
    }
    match ka.iter().map(|k| k.1).cmp(kb.iter().map(|k| k.1)) {
        Ordering::Equal => {}
        ord => return ord,
    }
    a.cmp(b)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(mut names: Vec<&str>) -> Vec<&str> {
        names.sort_by(|a, b| vietnamese_cmp(a, b));
        names
    }

    #[test]
    fn base_letters_follow_vietnamese_alphabet() {
        // `ă` comes before `b` even though its codepoint is far higher.
        assert_eq!(vietnamese_cmp("ăn", "ba"), Ordering::Less);
        // `đ` sorts after `d`, before `e`.
        assert_eq!(sorted(vec!["Đạt", "Em", "Dũng"]), vec!["Dũng", "Đạt", "Em"]);
    }

    #[test]
    fn diacritic_vowels_sort_near_their_base() {
        assert_eq!(sorted(vec!["Ân", "Bình", "An"]), vec!["An", "Ân", "Bình"]);
        assert_eq!(sorted(vec!["Uyên", "Văn", "Út"]), vec!["Út", "Uyên", "Văn"]);
    }

    #[test]
    fn tone_marks_break_ties() {
        // huyền < sắc on the same base letters.
        assert_eq!(vietnamese_cmp("Toàn", "Toán"), Ordering::Less);
        assert_eq!(vietnamese_cmp("Hà", "Hạ"), Ordering::Less);
    }

    #[test]
    fn case_is_a_last_resort_tiebreak() {
        assert_eq!(vietnamese_cmp("an", "An"), Ordering::Greater);
        assert_eq!(vietnamese_cmp("An", "An"), Ordering::Equal);
    }

    #[test]
    fn shorter_prefix_sorts_first() {
        assert_eq!(vietnamese_cmp("An", "Anh"), Ordering::Less);
    }
}
