use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use enchufito_core::{Grid, Level, propagate};

const W: u8 = 1;
const S: u8 = 1 << 1;
const E: u8 = 1 << 2;
const N: u8 = 1 << 3;
const PLANT: u8 = 1 << 5;

/// Serpentine level: a single chain from the plant through every tile, so
/// the pass touches the whole grid.
fn serpentine(width: u8, height: u8) -> Level {
    let w = usize::from(width);
    let h = usize::from(height);

    let mut cells = vec![0u8; w * h];
    for y in 0..h {
        for x in 0..w {
            cells[y * w + x] = match x {
                0 => E,
                x if x == w - 1 => W,
                _ => W | E,
            };
        }
    }
    for y in 0..h - 1 {
        let x = if y % 2 == 0 { w - 1 } else { 0 };
        cells[y * w + x] |= S;
        cells[(y + 1) * w + x] |= N;
    }
    cells[0] |= PLANT;

    Level::new((width, height), cells).unwrap()
}

fn bench_propagate(c: &mut Criterion) {
    let mut group = c.benchmark_group("propagate");

    for size in [8u8, 16, 32] {
        let level = serpentine(size, size);
        let mut grid = Grid::from_level(&level).unwrap();
        group.bench_function(format!("serpentine_{size}x{size}"), |b| {
            b.iter(|| black_box(propagate(&mut grid)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_propagate);
criterion_main!(benches);
