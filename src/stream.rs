use std::io::{self, Seek, SeekFrom};

pub trait StreamEof {
    /// True when the cursor sits at the end of the stream. The position is left unchanged.
    fn is_eof(&mut self) -> io::Result<bool>;
}

impl<S: Seek + ?Sized> StreamEof for S {
    fn is_eof(&mut self) -> io::Result<bool> {
        let position = self.stream_position()?;
        let end = self.seek(SeekFrom::End(0))?;
        if position != end {
            self.seek(SeekFrom::Start(position))?;
        }
        Ok(position == end)
    }
}
