use byteorder::BE;
use byteorder::ReadBytesExt;
use byteorder::WriteBytesExt;
use std::io::Read;
use std::io::Write;

// length-prefixed big-endian vectors shared by Blob implementors

/// elements decoded per read; a corrupt length prefix fails at end of
/// input instead of allocating for the whole claimed length
const CHUNK: usize = 1 << 16;

fn read_chunked<R, T, F>(reader: &mut R, fill: F) -> anyhow::Result<Vec<T>>
where
    R: Read,
    T: Copy + Default,
    F: Fn(&mut R, &mut [T]) -> std::io::Result<()>,
{
    let n = reader.read_u64::<BE>()? as usize;
    let mut values = Vec::with_capacity(n.min(CHUNK));
    while values.len() < n {
        let start = values.len();
        values.resize(start + (n - start).min(CHUNK), T::default());
        fill(reader, &mut values[start..])?;
    }
    Ok(values)
}

pub fn write_u16s<W: Write>(writer: &mut W, values: &[u16]) -> anyhow::Result<()> {
    writer.write_u64::<BE>(values.len() as u64)?;
    for value in values {
        writer.write_u16::<BE>(*value)?;
    }
    Ok(())
}
pub fn read_u16s<R: Read>(reader: &mut R) -> anyhow::Result<Vec<u16>> {
    read_chunked(reader, |reader, chunk| reader.read_u16_into::<BE>(chunk))
}

pub fn write_u32s<W: Write>(writer: &mut W, values: &[u32]) -> anyhow::Result<()> {
    writer.write_u64::<BE>(values.len() as u64)?;
    for value in values {
        writer.write_u32::<BE>(*value)?;
    }
    Ok(())
}
pub fn read_u32s<R: Read>(reader: &mut R) -> anyhow::Result<Vec<u32>> {
    read_chunked(reader, |reader, chunk| reader.read_u32_into::<BE>(chunk))
}

pub fn write_f32s<W: Write>(writer: &mut W, values: &[f32]) -> anyhow::Result<()> {
    writer.write_u64::<BE>(values.len() as u64)?;
    for value in values {
        writer.write_f32::<BE>(*value)?;
    }
    Ok(())
}
pub fn read_f32s<R: Read>(reader: &mut R) -> anyhow::Result<Vec<f32>> {
    read_chunked(reader, |reader, chunk| reader.read_f32_into::<BE>(chunk))
}

pub fn write_str<W: Write>(writer: &mut W, value: &str) -> anyhow::Result<()> {
    writer.write_u32::<BE>(value.len() as u32)?;
    writer.write_all(value.as_bytes())?;
    Ok(())
}
pub fn read_str<R: Read>(reader: &mut R) -> anyhow::Result<String> {
    let n = reader.read_u32::<BE>()? as usize;
    let mut bytes = Vec::with_capacity(n.min(CHUNK));
    reader.by_ref().take(n as u64).read_to_end(&mut bytes)?;
    anyhow::ensure!(bytes.len() == n, "string of {} bytes cut short at {}", n, bytes.len());
    Ok(String::from_utf8(bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn vectors_and_strings() {
        let ref mut buffer = Vec::new();
        write_u16s(buffer, &[1, 65535]).unwrap();
        write_f32s(buffer, &[0.5, -2.25]).unwrap();
        write_str(buffer, "r1/c").unwrap();
        let ref mut reader = Cursor::new(buffer);
        assert_eq!(read_u16s(reader).unwrap(), vec![1, 65535]);
        assert_eq!(read_f32s(reader).unwrap(), vec![0.5, -2.25]);
        assert_eq!(read_str(reader).unwrap(), "r1/c");
    }

    #[test]
    fn truncated_is_error() {
        let ref mut buffer = Vec::new();
        write_u32s(buffer, &[7, 8, 9]).unwrap();
        buffer.truncate(buffer.len() - 2);
        assert!(read_u32s(&mut Cursor::new(buffer)).is_err());
    }

    #[test]
    fn spans_several_chunks() {
        let values = (0..CHUNK as u32 * 2 + 3).collect::<Vec<_>>();
        let ref mut buffer = Vec::new();
        write_u32s(buffer, &values).unwrap();
        assert_eq!(read_u32s(&mut Cursor::new(buffer)).unwrap(), values);
    }

    #[test]
    fn absurd_length_is_error() {
        let ref mut buffer = Vec::new();
        buffer.write_u64::<BE>(u64::MAX >> 8).unwrap();
        buffer.write_f32::<BE>(1.5).unwrap();
        assert!(read_f32s(&mut Cursor::new(buffer.clone())).is_err());
        let ref mut text = Vec::new();
        text.write_u32::<BE>(u32::MAX).unwrap();
        text.write_all(b"short").unwrap();
        assert!(read_str(&mut Cursor::new(text)).is_err());
    }
}
