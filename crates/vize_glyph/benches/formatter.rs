//! Benchmarks for vize_glyph template formatter

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use vize_glyph::{format_template, FormatOptions};

const SNIPPET_TEMPLATE: &str = r#"<template><my-input placeholder="Name" disabled :max-length="20" /></template>"#;

const COMPLEX_TEMPLATE: &str = r#"<template>
<div class="app" :class="{ dark: isDark }">
<header class="header"><nav><ul>
<li v-for="item in items" :key="item.id"><router-link :to="item.path" class="nav-link">{{ item.label }}</router-link></li>
</ul></nav></header>
<main>
<!-- content -->
<section v-if="loading" class="loading"><spinner size="large" /></section>
<section v-else class="content">
<h1>{{ title }}</h1>
<p>
  Lorem ipsum dolor sit amet, consectetur adipiscing elit,
  sed do eiusmod tempor incididunt ut labore et dolore magna aliqua.
</p>
<my-button variant="primary" size="large" :disabled="!canSubmit" @click="submit" aria-label="Submit the form">Submit</my-button>
<img src="/logo.png" alt="Logo">
</section>
</main>
</div>
</template>"#;

fn benchmark_format_snippet(c: &mut Criterion) {
    let options = FormatOptions::snippet();

    let mut group = c.benchmark_group("format_snippet");
    group.throughput(Throughput::Bytes(SNIPPET_TEMPLATE.len() as u64));

    group.bench_function("single_component", |b| {
        b.iter(|| format_template(black_box(SNIPPET_TEMPLATE), black_box(&options)).unwrap())
    });

    group.finish();
}

fn benchmark_format_template(c: &mut Criterion) {
    let mut group = c.benchmark_group("format_template");
    group.throughput(Throughput::Bytes(COMPLEX_TEMPLATE.len() as u64));

    let css = FormatOptions::default();
    group.bench_function("complex_template_css", |b| {
        b.iter(|| format_template(black_box(COMPLEX_TEMPLATE), black_box(&css)).unwrap())
    });

    let ignore = FormatOptions::snippet();
    group.bench_function("complex_template_ignore", |b| {
        b.iter(|| format_template(black_box(COMPLEX_TEMPLATE), black_box(&ignore)).unwrap())
    });

    group.finish();
}

criterion_group!(benches, benchmark_format_snippet, benchmark_format_template);

criterion_main!(benches);
