// -- sink.rs --

use {
    super::error::{Error, Result},
    chrono::{Datelike, NaiveDateTime, Timelike},
    std::{
        fs::{self, File, OpenOptions},
        io::{self, BufWriter, Write},
        path::{Path, PathBuf},
    },
};

// --

const BUFFER_SIZE: usize = 256 * 1024;

/// How a rotated file is renamed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum RotationNaming {
    /// `<path>.<Y><M><D>.<h><m><D>`: unpadded fields, the day repeated
    /// where the minute suffix ends. Matches files written by older
    /// deployments of this log format.
    Legacy,
    /// `<path>.<YYYYMMDD>.<hhmm>`, zero-padded.
    #[default]
    Minute,
}

impl RotationNaming {
    pub fn rotated_path(self, path: &Path, now: NaiveDateTime) -> PathBuf {
        let suffix = match self {
            RotationNaming::Legacy => format!(
                "{}{}{}.{}{}{}",
                now.year(),
                now.month(),
                now.day(),
                now.hour(),
                now.minute(),
                now.day()
            ),
            RotationNaming::Minute => now.format("%Y%m%d.%H%M").to_string(),
        };
        let mut name = path.as_os_str().to_owned();
        name.push(".");
        name.push(suffix);
        PathBuf::from(name)
    }
}

// --

/// The single log file plus its write buffer and byte count.
///
/// Closed until the first write, then open for good; rotation swaps the
/// file underneath without leaving the open state.
pub struct RotatingSink {
    path: PathBuf,
    limit: u64,
    naming: RotationNaming,
    writer: Option<BufWriter<File>>,
    nbytes: u64,
}

impl RotatingSink {
    pub fn new(path: impl Into<PathBuf>, limit: u64, naming: RotationNaming) -> Self {
        Self {
            path: path.into(),
            limit,
            naming,
            writer: None,
            nbytes: 0,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn limit(&self) -> u64 {
        self.limit
    }

    pub fn is_open(&self) -> bool {
        self.writer.is_some()
    }

    /// Bytes accepted since the current file was created.
    pub fn bytes_written(&self) -> u64 {
        self.nbytes
    }

    fn create_file(path: &Path) -> Result<BufWriter<File>> {
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)
            .map_err(|source| Error::Create {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(BufWriter::with_capacity(BUFFER_SIZE, file))
    }

    /// Creates the file if this is the first use.
    pub fn open(&mut self) -> Result<()> {
        if self.writer.is_none() {
            self.writer = Some(Self::create_file(&self.path)?);
            self.nbytes = 0;
        }
        Ok(())
    }

    fn rotate(&mut self, now: NaiveDateTime) -> Result<()> {
        let to = self.naming.rotated_path(&self.path, now);
        if let Some(mut w) = self.writer.take() {
            // 旧文件尽量写完，失败也继续滚动
            let _ = w.flush();
        }
        fs::rename(&self.path, &to).map_err(|source| Error::Rotate {
            from: self.path.clone(),
            to,
            source,
        })?;
        self.writer = Some(Self::create_file(&self.path)?);
        self.nbytes = 0;
        Ok(())
    }

    /// Appends `data`, rotating first when it would reach the size limit.
    pub fn write(&mut self, data: &[u8], now: NaiveDateTime) -> Result<usize> {
        self.open()?;
        if self.nbytes + data.len() as u64 >= self.limit {
            self.rotate(now)?;
        }
        let w = self.writer.as_mut().ok_or_else(|| {
            Error::Write(io::Error::new(io::ErrorKind::NotConnected, "log file is closed"))
        })?;
        w.write_all(data).map_err(Error::Write)?;
        self.nbytes += data.len() as u64;
        Ok(data.len())
    }

    /// Pushes buffered bytes to the file and asks the OS to persist them.
    pub fn flush_and_sync(&mut self) -> io::Result<()> {
        match self.writer.as_mut() {
            Some(w) => {
                w.flush()?;
                w.get_ref().sync_all()
            }
            None => Ok(()),
        }
    }
}

// --
