use crate::error::MinimizerError;
use crate::minimize::{Simplex, SimplexObserver, Step};
use regex::Regex;
use simple_error::{SimpleError, bail};
use std::error::Error;
use std::fs;
use std::io::Write;

macro_rules! unwrap_or_bail {
    ($opt: expr, $msg: expr) => {
        match $opt {
            Some(v) => v,
            None => {
                bail!($msg);
            }
        }
    };
}

/// One simplex read back from a trace: rows of coordinates followed by the
/// evaluation of that point.
pub type TraceBlock = Vec<Vec<f64>>;

const BLOCK_START: &str = "Simplex";
const BLOCK_END: &str = "End";

/// Write `simplex` as a `Simplex` / rows / `End` block.
///
/// Each row holds the coordinates of one point and its evaluation, comma
/// separated with six decimals, best point first.
pub fn write_simplex<W: Write + ?Sized>(simplex: &Simplex, w: &mut W) -> Result<(), MinimizerError> {
    writeln!(w, "{}", BLOCK_START)?;
    for (p, e) in simplex.points().iter().zip(simplex.evaluations()) {
        writeln!(w, "{},{:.6}", p, e)?;
    }
    writeln!(w, "{}", BLOCK_END)?;
    Ok(())
}

/// Observer writing every simplex it sees to a sink.
///
/// Writing stops at the first I/O error, which is reported by
/// [`finish`](TraceWriter::finish).
pub struct TraceWriter<W: Write> {
    sink: W,
    blocks: usize,
    error: Option<MinimizerError>,
}

impl<W: Write> TraceWriter<W> {
    pub fn new(sink: W) -> Self {
        TraceWriter {
            sink,
            blocks: 0,
            error: None,
        }
    }

    /// Number of blocks written so far
    pub fn blocks(&self) -> usize {
        self.blocks
    }

    /// Flush and hand back the sink
    pub fn finish(mut self) -> Result<W, MinimizerError> {
        if let Some(err) = self.error.take() {
            return Err(err);
        }
        self.sink.flush()?;
        Ok(self.sink)
    }
}

impl<W: Write> SimplexObserver for TraceWriter<W> {
    fn observe(&mut self, _iteration: usize, simplex: &Simplex, _step: Option<Step>) {
        if self.error.is_some() {
            return;
        }
        match write_simplex(simplex, &mut self.sink) {
            Ok(()) => self.blocks += 1,
            Err(err) => self.error = Some(err),
        }
    }
}

fn parse_row(re_value: &Regex, line: &str, lineno: usize) -> Result<Vec<f64>, SimpleError> {
    let mut row = vec![];
    for field in line.split(',') {
        let field = field.trim();
        if !re_value.is_match(field) {
            return Err(SimpleError::new(format!("line {}: '{}' is not a number", lineno, field)));
        }
        let value: f64 = field
            .parse()
            .map_err(|_| SimpleError::new(format!("line {}: bad number '{}'", lineno, field)))?;
        row.push(value);
    }
    if row.len() < 2 {
        return Err(SimpleError::new(format!(
            "line {}: expected coordinates followed by an evaluation",
            lineno
        )));
    }
    Ok(row)
}

/// Parse every `Simplex ... End` block in `content`
pub fn read_trace(content: &str) -> Result<Vec<TraceBlock>, SimpleError> {
    let re_value = Regex::new(
        r"^[+-]?(?:\d+(?:\.\d*)?(?:[eE][+-]?\d+)?|\.\d+(?:[eE][+-]?\d+)?|inf|NaN)$",
    )
    .map_err(SimpleError::from)?;

    let mut blocks: Vec<TraceBlock> = vec![];
    let mut current: Option<TraceBlock> = None;

    for (n, raw) in content.lines().enumerate() {
        let line = raw.trim();
        let lineno = n + 1;

        match (line, current.is_some()) {
            ("", false) => continue,
            (BLOCK_START, false) => current = Some(vec![]),
            (BLOCK_START, true) => {
                return Err(SimpleError::new(format!(
                    "line {}: block opened before the previous one ended",
                    lineno
                )));
            }
            (BLOCK_END, true) => {
                let block = unwrap_or_bail!(current.take(), "unreachable block state");
                blocks.push(block);
            }
            (BLOCK_END, false) => {
                return Err(SimpleError::new(format!("line {}: End without a matching Simplex", lineno)));
            }
            (_, false) => {
                return Err(SimpleError::new(format!("line {}: unexpected text outside a block", lineno)));
            }
            (_, true) => {
                let row = parse_row(&re_value, line, lineno)?;
                let block = unwrap_or_bail!(current.as_mut(), "unreachable block state");
                if let Some(first) = block.first() {
                    if first.len() != row.len() {
                        return Err(SimpleError::new(format!(
                            "line {}: expected {} values, found {}",
                            lineno,
                            first.len(),
                            row.len()
                        )));
                    }
                }
                block.push(row);
            }
        }
    }

    if current.is_some() {
        bail!("trace ended inside a block");
    }
    Ok(blocks)
}

/// Read a trace file written by [`TraceWriter`]
pub fn read_trace_file(file_path: &str) -> Result<Vec<TraceBlock>, Box<dyn Error>> {
    let content = fs::read_to_string(file_path)?;
    Ok(read_trace(&content)?)
}

#[cfg(test)]
mod file_tests {
    use super::*;
    use crate::point::Point;

    fn simplex() -> Simplex {
        let mut s = Simplex::new(2).unwrap();
        s.insert_during_fill(Point::from_vec(vec![1.0, 2.0]).unwrap(), 3.5)
            .unwrap();
        s.insert_during_fill(Point::from_vec(vec![-0.25, 4.0]).unwrap(), 1.0)
            .unwrap();
        s.insert_during_fill(Point::from_vec(vec![0.0, 0.0]).unwrap(), 7.0)
            .unwrap();
        s
    }

    #[test]
    fn test_write_simplex() {
        let mut out: Vec<u8> = vec![];
        write_simplex(&simplex(), &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Simplex\n\
             -0.250000,4.000000,1.000000\n\
             1.000000,2.000000,3.500000\n\
             0.000000,0.000000,7.000000\n\
             End\n"
        );
    }

    #[test]
    fn test_trace_writer() {
        let s = simplex();
        let mut writer = TraceWriter::new(vec![]);
        writer.observe(0, &s, None);
        writer.observe(1, &s, Some(Step::Reflect));
        assert_eq!(writer.blocks(), 2);

        let out = String::from_utf8(writer.finish().unwrap()).unwrap();
        let blocks = read_trace(&out).unwrap();
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0], blocks[1]);
        assert_eq!(blocks[0][0], vec![-0.25, 4.0, 1.0]);
        assert_eq!(blocks[0][2], vec![0.0, 0.0, 7.0]);
    }

    struct Broken;

    impl Write for Broken {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_trace_writer_error() {
        let mut writer = TraceWriter::new(Broken);
        writer.observe(0, &simplex(), None);
        writer.observe(1, &simplex(), None);
        assert_eq!(writer.blocks(), 0);
        assert!(matches!(writer.finish(), Err(MinimizerError::Io(_))));
    }

    #[test]
    fn test_read_trace_blank_lines() {
        let content = "\nSimplex\n1,2,3\n4.5,-1e-3,inf\nEnd\n\nSimplex\n0,0,0\nEnd\n";
        let blocks = read_trace(content).unwrap();
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0][1][1], -1e-3);
        assert!(blocks[0][1][2].is_infinite());
        assert_eq!(blocks[1], vec![vec![0.0, 0.0, 0.0]]);
    }

    #[test]
    fn test_read_trace_errors() {
        assert!(read_trace("Simplex\n1,2,3\n").is_err());
        assert!(read_trace("End\n").is_err());
        assert!(read_trace("1,2,3\n").is_err());
        assert!(read_trace("Simplex\n1,x,3\nEnd\n").is_err());
        assert!(read_trace("Simplex\n1,2,3\n1,2\nEnd\n").is_err());
        assert!(read_trace("Simplex\n1\nEnd\n").is_err());
        assert!(read_trace("Simplex\nSimplex\nEnd\n").is_err());
        assert!(read_trace("").unwrap().is_empty());
    }

    #[test]
    fn test_read_trace_file_missing() {
        assert!(read_trace_file("/nonexistent/downhill/trace.txt").is_err());
    }
}
