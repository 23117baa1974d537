use byteorder::BE;
use byteorder::ReadBytesExt;
use byteorder::WriteBytesExt;
use std::fs::File;
use std::io::BufReader;
use std::io::BufWriter;
use std::io::Read;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;

/// for types that can be written to and loaded from disk.
///
/// implementors only encode their body; framing, buffering
/// and directory creation are shared.
pub trait Blob: Sized {
    /// tag written after the header and verified on load
    fn name() -> &'static str;
    /// encode the body
    fn write<W: Write>(&self, writer: &mut W) -> anyhow::Result<()>;
    /// decode the body
    fn read<R: Read>(reader: &mut R) -> anyhow::Result<Self>;

    /// signature that opens every file
    fn header() -> &'static [u8] {
        b"NLHEBLOB"
    }
    /// signature that closes every file
    fn footer() -> u16 {
        0xFFFF
    }
    /// check if file exists on disk
    fn done(path: &Path) -> bool {
        std::fs::metadata(path).is_ok()
    }
    /// sibling path the body is written to before it replaces `path`
    fn staging(path: &Path) -> PathBuf {
        let mut name = path.as_os_str().to_owned();
        name.push(".tmp");
        PathBuf::from(name)
    }
    /// write to disk, creating parent directories as needed.
    /// the file at `path` is replaced whole or left as it was.
    fn save(&self, path: &Path) -> anyhow::Result<()> {
        log::info!("{:<32}{:<32}", format!("saving      {}", Self::name()), path.display());
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let ref staging = Self::staging(path);
        {
            let ref mut writer = BufWriter::new(File::create(staging)?);
            writer.write_all(Self::header())?;
            writer.write_u16::<BE>(Self::name().len() as u16)?;
            writer.write_all(Self::name().as_bytes())?;
            self.write(writer)?;
            writer.write_u16::<BE>(Self::footer())?;
            writer.flush()?;
            writer.get_ref().sync_all()?;
        }
        std::fs::rename(staging, path)?;
        Ok(())
    }
    /// read from disk, rejecting files of another artifact
    fn load(path: &Path) -> anyhow::Result<Self> {
        log::info!("{:<32}{:<32}", format!("loading     {}", Self::name()), path.display());
        let ref mut reader = BufReader::new(File::open(path)?);
        let mut header = vec![0u8; Self::header().len()];
        reader.read_exact(&mut header)?;
        anyhow::ensure!(header == Self::header(), "bad header in {}", path.display());
        let mut tag = vec![0u8; reader.read_u16::<BE>()? as usize];
        reader.read_exact(&mut tag)?;
        anyhow::ensure!(
            tag == Self::name().as_bytes(),
            "expected {} in {}, found {}",
            Self::name(),
            path.display(),
            String::from_utf8_lossy(&tag)
        );
        let this = Self::read(reader)?;
        anyhow::ensure!(
            reader.read_u16::<BE>()? == Self::footer(),
            "bad footer in {}",
            path.display()
        );
        Ok(this)
    }
}
