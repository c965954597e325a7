// Performance benchmarks for indexing, retrieval and matching
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use specmatch_core::{AttributeRecord, CandidateIndex, CatalogItem, IndexConfig, Requirement};
use specmatch_matching::{Recommender, SpecMatchEngine};

const VOLTAGES: [&str; 5] = ["1.1kv", "3.3kv", "6.6kv", "11kv", "33kv"];
const MATERIALS: [&str; 2] = ["al", "cu"];
const SECTIONS: [&str; 8] = [
    "2.5sqmm", "70sqmm", "95sqmm", "120sqmm", "185sqmm", "240sqmm", "300sqmm", "400sqmm",
];
const INSULATIONS: [&str; 3] = ["xlpe", "pvc", "epr"];
const ARMOURS: [&str; 3] = ["gi_strip", "swa", "unarmoured"];

fn pick<'a>(rng: &mut StdRng, values: &[&'a str]) -> &'a str {
    values[rng.random_range(0..values.len())]
}

fn generate_item(rng: &mut StdRng, id: usize) -> CatalogItem {
    let voltage = pick(rng, &VOLTAGES);
    let material = pick(rng, &MATERIALS);
    let section = pick(rng, &SECTIONS);
    let cores: u32 = rng.random_range(1..=4);
    let insulation = pick(rng, &INSULATIONS);
    let armour = pick(rng, &ARMOURS);

    CatalogItem::new(
        format!("SKU-{:05}", id),
        format!("{} {}C x {} {} cable", voltage, cores, section, material),
        format!(
            "{} {} core {} {} {} insulated {} armoured cable, batch {}",
            voltage, cores, section, material, insulation, armour, id % 97
        ),
        AttributeRecord::builder()
            .voltage(voltage)
            .conductor_material(material)
            .cross_section(section)
            .core_count(cores)
            .insulation(insulation)
            .armouring(armour)
            .sheathing("pvc")
            .build(),
    )
}

fn generate_catalog(size: usize) -> Vec<CatalogItem> {
    let mut rng = StdRng::seed_from_u64(42);
    (0..size).map(|i| generate_item(&mut rng, i)).collect()
}

fn requirement() -> Requirement {
    Requirement::new(
        1,
        "11kV 3 Core 300 sq mm Aluminium XLPE GI Strip Armoured Cable",
        AttributeRecord::builder()
            .voltage("11kv")
            .conductor_material("al")
            .cross_section("300sqmm")
            .core_count(3)
            .insulation("xlpe")
            .armouring("gi_strip")
            .sheathing("pvc")
            .build(),
    )
}

fn benchmark_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");

    for size in [100, 1000, 10000].iter() {
        let catalog = generate_catalog(*size);
        group.bench_with_input(BenchmarkId::new("tfidf_index", size), size, |b, _| {
            b.iter(|| {
                let index =
                    CandidateIndex::from_items(IndexConfig::default(), catalog.clone()).unwrap();
                black_box(index);
            });
        });
    }

    group.finish();
}

fn benchmark_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("search");
    let index =
        CandidateIndex::from_items(IndexConfig::default(), generate_catalog(10000)).unwrap();
    let query = requirement().text;

    group.bench_function("top_5", |b| {
        b.iter(|| {
            let results = index.search(black_box(&query), 5).unwrap();
            black_box(results);
        });
    });

    group.finish();
}

fn benchmark_scoring(c: &mut Criterion) {
    let mut group = c.benchmark_group("scoring");
    let engine = SpecMatchEngine::default();
    let catalog = generate_catalog(1000);
    let candidates: Vec<&CatalogItem> = catalog.iter().collect();
    let attributes = requirement().attributes;

    group.bench_function("score_pair", |b| {
        b.iter(|| black_box(engine.score(black_box(&attributes), &catalog[0].attributes)));
    });

    group.bench_function("rank_1000", |b| {
        b.iter(|| black_box(engine.rank(&attributes, &candidates)));
    });

    group.finish();
}

fn benchmark_recommend_batch(c: &mut Criterion) {
    let mut group = c.benchmark_group("recommend_batch");
    let index = CandidateIndex::from_items(IndexConfig::default(), generate_catalog(1000)).unwrap();
    let recommender = Recommender::default();
    let requirements: Vec<Requirement> = (0..100)
        .map(|i| {
            let mut r = requirement();
            r.item_id = i;
            r
        })
        .collect();

    group.bench_function("100_items", |b| {
        b.iter(|| black_box(recommender.recommend_batch(&index, &requirements)));
    });

    group.finish();
}

criterion_group!(
    benches,
    benchmark_build,
    benchmark_search,
    benchmark_scoring,
    benchmark_recommend_batch
);
criterion_main!(benches);
