use criterion::{black_box, criterion_group, criterion_main, Criterion};
use pxemenu::load::{load, script_lines};
use pxemenu::script::expand::{substitute, substitute_cow};
use pxemenu::var::VarStore;

fn make_store() -> VarStore {
    VarStore::with_defaults((0..50).map(|i| (format!("var{i}"), format!("value-{i}"))))
}

fn make_script(items: usize) -> String {
    let mut s = String::from("#!ipxe\ncolour --rgb 336699 1\ncpair --foreground 7 --background 1 0\n");
    s.push_str(":variables\nset base http://10.0.0.1:5000\nset version 1.0\n:menu\nmenu Boot ${version}\n");
    for i in 0..items {
        s.push_str(&format!("item opt{i} Option {i} ${{version}}\n"));
        if i % 10 == 0 {
            s.push_str(&format!("item --gap Group {i}\n"));
        }
    }
    s.push_str("choose target\n");
    for i in 0..items {
        s.push_str(&format!(":opt{i}\nkernel ${{base}}/{i}/vmlinuz\nboot\n"));
    }
    s
}

fn bench_substitute(c: &mut Criterion) {
    let vars = make_store();
    let plain = "kernel http://10.0.0.1:5000/vmlinuz initrd=initrd.img quiet".repeat(4);
    let dense = (0..50).map(|i| format!("${{var{i}}} ")).collect::<String>();
    let unknown = "${nope} ${space} ${var1:hex} ".repeat(10);

    let mut g = c.benchmark_group("substitute");
    g.bench_function("no_placeholders", |b| b.iter(|| substitute(black_box(&plain), &vars)));
    g.bench_function("no_placeholders_cow", |b| {
        b.iter(|| substitute_cow(black_box(&plain), &vars).len())
    });
    g.bench_function("dense", |b| b.iter(|| substitute(black_box(&dense), &vars)));
    g.bench_function("mixed_unknown", |b| b.iter(|| substitute(black_box(&unknown), &vars)));
    g.finish();
}

fn bench_load(c: &mut Criterion) {
    let defaults = VarStore::new();
    let small = script_lines(&make_script(10));
    let large = script_lines(&make_script(500));

    let mut g = c.benchmark_group("load");
    g.bench_function("small", |b| b.iter(|| load(black_box(small.as_slice()), &defaults)));
    g.bench_function("large", |b| b.iter(|| load(black_box(large.as_slice()), &defaults)));
    g.finish();
}

criterion_group!(benches, bench_substitute, bench_load);
criterion_main!(benches);
