use criterion::{black_box, criterion_group, criterion_main, Criterion};
use ringcore::{Key, LocalRingNode, NodeDescriptor};

fn bench_register(c: &mut Criterion) {
    let peer = NodeDescriptor::new("peer");
    c.bench_function("register_node_512", |b| {
        b.iter_batched(
            || LocalRingNode::new("local"),
            |mut local| black_box(local.register_node(peer.clone())),
            criterion::BatchSize::SmallInput,
        )
    });
}

fn bench_lookup(c: &mut Criterion) {
    let mut local = LocalRingNode::new("local");
    for i in 0..16 {
        local.register_node(NodeDescriptor::new(format!("peer{i}"))).unwrap();
    }
    let keys: Vec<Key> = (0..1024).map(|_| Key::random()).collect();

    c.bench_function("get_node_for", |b| {
        let mut i = 0;
        b.iter(|| {
            i = (i + 1) % keys.len();
            black_box(local.get_node_for(&keys[i]).id())
        })
    });

    c.bench_function("get_nodes_for_3", |b| {
        let mut i = 0;
        b.iter(|| {
            i = (i + 1) % keys.len();
            black_box(local.get_nodes_for(&keys[i], 3).len())
        })
    });
}

criterion_group!(benches, bench_register, bench_lookup);
criterion_main!(benches);
