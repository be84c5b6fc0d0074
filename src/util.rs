/// Byte Order Mark (BOM) is used to signal the endianness of an encoding. The order `0xFF 0xFE`
/// strongly suggests that the encoding is using little-endian byte order.
///
/// <https://en.wikipedia.org/wiki/Byte_order_mark>
const BOM_UTF16_LE: &[u8] = &[0xFF, 0xFE];
const BOM_UTF8: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Turn raw file contents into text.
///
/// Editors on Windows like to save config files as UTF-16 LE; everything else is taken as
/// UTF-8, with invalid sequences replaced rather than rejected.
#[must_use]
pub fn decode_data(data: &[u8]) -> String {
    if let Some(rest) = data.strip_prefix(BOM_UTF16_LE) {
        let utf16 = rest
            .chunks_exact(2)
            .map(|chunk| u16::from_le_bytes([chunk[0], chunk[1]]))
            .collect::<Vec<u16>>();

        char::decode_utf16(utf16)
            .map(|c| c.unwrap_or(char::REPLACEMENT_CHARACTER))
            .collect::<String>()
    } else {
        let data = data.strip_prefix(BOM_UTF8).unwrap_or(data);
        String::from_utf8_lossy(data).into_owned()
    }
}
