//! CSV record streams for offline plotting
//!
//! Per frame: `positions_NNNN.csv` with one `X,Y,VX,VY` row per particle
//! and `net_force_NNNN.csv` with a single `X,Y` row. Once per run:
//! `airfoil.csv` with the polygon vertices.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::simulation::geometry::Vec2;
use crate::simulation::world::World;

pub fn positions_file_name(frame: usize) -> String {
    format!("positions_{frame:04}.csv")
}

pub fn force_file_name(frame: usize) -> String {
    format!("net_force_{frame:04}.csv")
}

pub const AIRFOIL_FILE_NAME: &str = "airfoil.csv";

pub fn write_positions<W: Write>(out: &mut W, records: impl IntoIterator<Item = [f64; 4]>) -> io::Result<()> {
    writeln!(out, "X,Y,VX,VY")?;
    for [x, y, vx, vy] in records {
        writeln!(out, "{x},{y},{vx},{vy}")?;
    }
    Ok(())
}

pub fn write_force<W: Write>(out: &mut W, force: [f64; 2]) -> io::Result<()> {
    writeln!(out, "X,Y")?;
    writeln!(out, "{},{}", force[0], force[1])
}

pub fn write_airfoil<W: Write>(out: &mut W, vertices: &[Vec2]) -> io::Result<()> {
    writeln!(out, "X,Y")?;
    for v in vertices {
        writeln!(out, "{},{}", v.x, v.y)?;
    }
    Ok(())
}

/// Writes frame files into one output directory
pub struct FrameWriter {
    dir: PathBuf,
}

impl FrameWriter {
    /// Creates the directory if it does not exist yet
    pub fn create(dir: impl AsRef<Path>) -> io::Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn open(&self, name: &str) -> io::Result<BufWriter<File>> {
        Ok(BufWriter::new(File::create(self.dir.join(name))?))
    }

    pub fn write_airfoil(&self, world: &World) -> io::Result<()> {
        let mut out = self.open(AIRFOIL_FILE_NAME)?;
        write_airfoil(&mut out, world.airfoil().shape.vertices())?;
        out.flush()
    }

    /// Force file always, positions only when asked for
    pub fn write_frame(&self, frame: usize, world: &World, positions: bool) -> io::Result<()> {
        if positions {
            let mut out = self.open(&positions_file_name(frame))?;
            write_positions(&mut out, world.particle_records())?;
            out.flush()?;
        }
        let mut out = self.open(&force_file_name(frame))?;
        write_force(&mut out, world.force_record())?;
        out.flush()
    }
}
