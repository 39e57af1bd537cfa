/// Number of codes a `CodeSet` can hold. Covers every event type up to
/// `KEY_MAX` (0x2ff), the largest code space the kernel defines.
pub const CODE_CAPACITY: usize = 0x300;

const WORD_BITS: usize = u64::BITS as usize;
const WORDS: usize = CODE_CAPACITY / WORD_BITS;

/// Fixed-capacity set of event codes with O(1) membership.
#[derive(Clone, Copy, PartialEq, Eq, Default)]
pub struct CodeSet {
    words: [u64; WORDS],
}

impl CodeSet {
    pub const fn new() -> Self {
        Self { words: [0; WORDS] }
    }

    /// Decode a kernel bitmask given as native machine words, keeping only
    /// codes `<= max_code`.
    pub fn from_kernel_words(words: &[libc::c_ulong], max_code: u16) -> Self {
        let bits_per_word = libc::c_ulong::BITS as usize;
        let mut set = Self::new();
        for (i, &word) in words.iter().enumerate() {
            if word == 0 {
                continue;
            }
            for bit in 0..bits_per_word {
                if (word >> bit) & 1 == 0 {
                    continue;
                }
                let code = i * bits_per_word + bit;
                if code > max_code as usize {
                    return set;
                }
                set.insert(code as u16);
            }
        }
        set
    }

    /// Inserts `code`; returns false if it is outside the capacity.
    pub fn insert(&mut self, code: u16) -> bool {
        let code = code as usize;
        if code >= CODE_CAPACITY {
            return false;
        }
        self.words[code / WORD_BITS] |= 1 << (code % WORD_BITS);
        true
    }

    pub fn contains(&self, code: u16) -> bool {
        let code = code as usize;
        code < CODE_CAPACITY && (self.words[code / WORD_BITS] >> (code % WORD_BITS)) & 1 == 1
    }

    pub fn len(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.words.iter().all(|&w| w == 0)
    }

    /// Codes in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = u16> + '_ {
        (0..CODE_CAPACITY as u16).filter(move |&c| self.contains(c))
    }
}

impl FromIterator<u16> for CodeSet {
    fn from_iter<I: IntoIterator<Item = u16>>(iter: I) -> Self {
        let mut set = Self::new();
        for code in iter {
            set.insert(code);
        }
        set
    }
}

impl std::fmt::Debug for CodeSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

/// Number of `c_ulong` words needed to hold codes `0..=max_code`.
pub fn kernel_words_for(max_code: u16) -> usize {
    let bits = libc::c_ulong::BITS as usize;
    (max_code as usize + bits) / bits
}
