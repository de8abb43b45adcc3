use criterion::{black_box, criterion_group, criterion_main, Criterion};
use docling_enhanced::MimeDetector;

fn bench_detection(c: &mut Criterion) {
    let detector = MimeDetector::new();

    let png = b"\x89PNG\r\n\x1a\n\x00\x00\x00\rIHDR".to_vec();
    let mut svg = b"<?xml version=\"1.0\"?>\n".to_vec();
    svg.extend(std::iter::repeat(b' ').take(900));
    svg.extend_from_slice(b"<svg/>");
    let opaque = vec![0x42u8; 4096];

    c.bench_function("detect_png_content", |b| {
        b.iter(|| detector.detect(black_box(Some("scan.pdf")), black_box(Some(png.as_slice()))))
    });
    c.bench_function("detect_late_svg_marker", |b| {
        b.iter(|| detector.detect_from_content(black_box(&svg)))
    });
    c.bench_function("detect_filename_fallback", |b| {
        b.iter(|| detector.detect(black_box(Some("report.docx")), black_box(Some(opaque.as_slice()))))
    });
}

criterion_group!(benches, bench_detection);
criterion_main!(benches);
