//! Hex rendering for demo harnesses.

use core::fmt;

/// Displays a byte buffer as two uppercase hexadecimal digits per byte,
/// separated by single spaces.
///
/// ```
/// use chainmix::HexDump;
///
/// assert_eq!(HexDump(&[0xF9, 0x06, 0xCF]).to_string(), "F9 06 CF");
/// ```
#[derive(Clone, Copy, Debug)]
pub struct HexDump<'a>(pub &'a [u8]);

impl fmt::Display for HexDump<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut bytes = self.0.iter();
        if let Some(b) = bytes.next() {
            write!(f, "{:02X}", b)?;
            for b in bytes {
                write!(f, " {:02X}", b)?;
            }
        }
        Ok(())
    }
}
