use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::io::Cursor;

use rand::rngs::SmallRng;
use rand::SeedableRng;

use vivarium_core::save::{SaveReader, SaveWriter};
use vivarium_core::SAVE_VERSION;
use vivarium_data::spawn::SpawnZone;
use vivarium_data::stage::NullExhibitDirector;
use vivarium_data::{CatalogPool, Habitat, SpecimenCatalog};

fn bench_persistence(c: &mut Criterion) {
    let mut pool = CatalogPool::new(SpecimenCatalog::new(5, 8));
    let mut habitat = Habitat::new();
    let zone = SpawnZone::default();
    let mut rng = SmallRng::seed_from_u64(0xC0FFEE);

    // Setup 1,000 live specimens
    for _ in 0..1_000 {
        habitat
            .spawn(&mut pool, &zone, &mut rng)
            .expect("catalog ids are always valid here");
    }

    let mut group = c.benchmark_group("Habitat Persistence");

    group.bench_function("Save 1,000 specimens", |b| {
        let mut bytes = Vec::with_capacity(16 * 1024);
        b.iter(|| {
            bytes.clear();
            let mut writer = SaveWriter::new(&mut bytes);
            habitat.save(&mut writer).unwrap();
            black_box(bytes.len());
        });
    });

    let mut bytes = Vec::new();
    habitat.save(&mut SaveWriter::new(&mut bytes)).unwrap();

    group.bench_function("Load and recycle 1,000 specimens", |b| {
        b.iter(|| {
            let mut restored = Habitat::new();
            let mut reader = SaveReader::new(Cursor::new(&bytes), SAVE_VERSION);
            restored
                .load(&mut reader, &mut pool, &NullExhibitDirector)
                .unwrap();
            black_box(restored.len());
            restored.clear(&mut pool);
        });
    });

    group.finish();
}

criterion_group!(benches, bench_persistence);
criterion_main!(benches);
