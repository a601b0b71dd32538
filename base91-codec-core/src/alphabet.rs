//! The basE91 symbol table and its inverse.
//!
//! Both tables are `const` data, so every encoder and decoder in the process
//! (on any thread) reads the same mapping without synchronisation.

/// Number of symbols in the alphabet.
pub const ALPHABET_SIZE: usize = 91;

/// The 91 printable ASCII symbols, indexed by the value they represent.
pub const ALPHABET: &[u8; ALPHABET_SIZE] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789!#$%&()*+,./:;<=>?@[]^_`{|}~\"";

/// Marks a byte which has no entry in [`ALPHABET`]
const NOT_IN_ALPHABET: u8 = 0xFF;

/// Inverse of [`ALPHABET`], built at compile time.
const VALUES: [u8; 256] = build_values();

const fn build_values() -> [u8; 256] {
    let mut values = [NOT_IN_ALPHABET; 256];
    let mut i = 0;
    while i < ALPHABET_SIZE {
        values[ALPHABET[i] as usize] = i as u8;
        i += 1;
    }
    values
}

/// The symbol representing `value`, or `None` if `value` is greater than 90.
#[inline]
pub fn symbol_of(value: u8) -> Option<u8> {
    ALPHABET.get(value as usize).copied()
}

/// The value (0..=90) represented by `symbol`, or `None` if the byte is not in the alphabet.
#[inline]
pub fn value_of(symbol: u8) -> Option<u8> {
    match VALUES[symbol as usize] {
        NOT_IN_ALPHABET => None,
        v => Some(v),
    }
}

/// Is `byte` one of the 91 symbols?
#[inline]
pub fn is_symbol(byte: u8) -> bool {
    VALUES[byte as usize] != NOT_IN_ALPHABET
}

/// Symbol lookup for the hot loops. `value` is always reduced mod 91 by the caller.
#[inline(always)]
pub(crate) fn symbol_unchecked(value: u32) -> u8 {
    debug_assert!(value < ALPHABET_SIZE as u32);
    ALPHABET[value as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_a_bijection() {
        for value in 0..ALPHABET_SIZE as u8 {
            let symbol = symbol_of(value).unwrap();
            assert_eq!(value_of(symbol), Some(value));
        }
        let symbols = (0..=255u8).filter(|b| is_symbol(*b)).count();
        assert_eq!(symbols, ALPHABET_SIZE);
    }

    #[test]
    fn symbols_are_printable_ascii() {
        assert!(ALPHABET.iter().all(|b| b.is_ascii_graphic()));
    }

    #[test]
    fn excluded_characters() {
        // The three printable characters basE91 leaves out, plus whitespace
        for b in [b'-', b'\\', b'\'', b' ', b'\n', b'\r', b'\t'] {
            assert_eq!(value_of(b), None, "{}", b as char);
        }
        assert_eq!(value_of(0x80), None);
        assert_eq!(value_of(0xFF), None);
    }

    #[test]
    fn out_of_range_value() {
        assert_eq!(symbol_of(90), Some(b'"'));
        assert_eq!(symbol_of(91), None);
        assert_eq!(symbol_of(255), None);
    }
}
