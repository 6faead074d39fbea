//! One-way in-memory byte channel between a thread unit and its creator.
//!
//! The writing half is an [`io::Write`] owned by the unit; the reading half
//! is an [`io::Read`] owned by the creator. Dropping the writer closes the
//! channel and the reader then sees end of stream.

use std::io::{self, Read, Write};

use crossbeam_channel::{Receiver, Sender};

/// Create a connected writer/reader pair.
#[must_use]
pub fn byte_channel() -> (ChannelWriter, ChannelReader) {
    let (tx, rx) = crossbeam_channel::unbounded();
    (
        ChannelWriter { tx },
        ChannelReader {
            rx,
            chunk: Vec::new(),
            pos: 0,
        },
    )
}

/// Writing half of a byte channel.
#[derive(Debug)]
pub struct ChannelWriter {
    tx: Sender<Vec<u8>>,
}

impl Write for ChannelWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }
        self.tx
            .send(buf.to_vec())
            .map_err(|_| io::Error::new(io::ErrorKind::BrokenPipe, "unit channel reader dropped"))?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Reading half of a byte channel.
#[derive(Debug)]
pub struct ChannelReader {
    rx: Receiver<Vec<u8>>,
    chunk: Vec<u8>,
    pos: usize,
}

impl Read for ChannelReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }
        if self.pos == self.chunk.len() {
            match self.rx.recv() {
                Ok(chunk) => {
                    self.chunk = chunk;
                    self.pos = 0;
                }
                // All writers gone: end of stream.
                Err(_) => return Ok(0),
            }
        }
        let n = buf.len().min(self.chunk.len() - self.pos);
        buf[..n].copy_from_slice(&self.chunk[self.pos..self.pos + n]);
        self.pos += n;
        Ok(n)
    }
}

#[cfg(test)]
mod tests {
    use std::io::{BufRead, BufReader};

    use super::*;

    #[test]
    fn bytes_arrive_in_order() {
        let (mut writer, reader) = byte_channel();
        writer.write_all(b"12\n").unwrap();
        writer.write_all(b"3").unwrap();
        writer.write_all(b"4\n").unwrap();
        drop(writer);

        let mut lines = BufReader::new(reader).lines();
        assert_eq!(lines.next().unwrap().unwrap(), "12");
        assert_eq!(lines.next().unwrap().unwrap(), "34");
        assert!(lines.next().is_none());
    }

    #[test]
    fn dropped_writer_is_end_of_stream() {
        let (writer, mut reader) = byte_channel();
        drop(writer);
        let mut buf = [0u8; 8];
        assert_eq!(reader.read(&mut buf).unwrap(), 0);
    }

    #[test]
    fn dropped_reader_is_broken_pipe() {
        let (mut writer, reader) = byte_channel();
        drop(reader);
        let err = writer.write(b"1\n").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
    }

    #[test]
    fn small_reads_split_chunks() {
        let (mut writer, mut reader) = byte_channel();
        writer.write_all(b"abcdef").unwrap();
        drop(writer);
        let mut buf = [0u8; 4];
        assert_eq!(reader.read(&mut buf).unwrap(), 4);
        assert_eq!(&buf, b"abcd");
        assert_eq!(reader.read(&mut buf).unwrap(), 2);
        assert_eq!(&buf[..2], b"ef");
        assert_eq!(reader.read(&mut buf).unwrap(), 0);
    }

    #[test]
    fn writer_on_other_thread() {
        let (mut writer, reader) = byte_channel();
        let handle = std::thread::spawn(move || {
            writer.write_all(b"7\n1\n").unwrap();
        });
        let mut line = String::new();
        BufReader::new(reader).read_line(&mut line).unwrap();
        assert_eq!(line, "7\n");
        handle.join().unwrap();
    }
}
