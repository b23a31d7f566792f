use fileconv::{CollisionPolicy, ConvertOptions, Error, FileConverter};
use pretty_assertions::assert_eq;
use rs_docx::document::Paragraph;
use rs_docx::Docx;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

fn temp_dir(prefix: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system time must be after UNIX_EPOCH")
        .as_nanos();
    let dir = std::env::temp_dir().join(format!(
        "fileconv_conversion_{}_{}_{}",
        prefix,
        std::process::id(),
        nanos
    ));
    std::fs::create_dir_all(&dir).expect("failed to create temp dir");
    dir
}

fn write_docx(path: &Path, paragraphs: &[&str]) {
    let mut docx = Docx::default();
    for text in paragraphs {
        docx.document.push(Paragraph::default().push_text(*text));
    }
    docx.write_file(path).expect("failed to write generated docx");
}

fn write_zip(path: &Path, entries: &[(&str, &str)]) {
    let file = File::create(path).expect("create zip");
    let mut zip = ZipWriter::new(file);
    for (name, content) in entries {
        zip.start_file(*name, SimpleFileOptions::default())
            .expect("start zip entry");
        zip.write_all(content.as_bytes()).expect("write zip entry");
    }
    zip.finish().expect("finish zip");
}

fn pdf_pages(path: &Path) -> Vec<String> {
    let doc = lopdf::Document::load(path).expect("output should be a readable PDF");
    doc.get_pages()
        .keys()
        .map(|n| doc.extract_text(&[*n]).expect("page text"))
        .collect()
}

fn assert_in_order(text: &str, needles: &[&str]) {
    let mut from = 0;
    for needle in needles {
        let found = text[from..]
            .find(needle)
            .unwrap_or_else(|| panic!("'{}' missing or out of order in {:?}", needle, text));
        from += found + needle.len();
    }
}

fn slide_xml(shapes: &[&[&str]]) -> String {
    let mut xml = String::from(
        r#"<?xml version="1.0" encoding="UTF-8"?><p:sld xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main"><p:cSld><p:spTree>"#,
    );
    for paragraphs in shapes {
        xml.push_str("<p:sp><p:txBody><a:bodyPr/>");
        for text in *paragraphs {
            xml.push_str(&format!("<a:p><a:r><a:t>{}</a:t></a:r></a:p>", text));
        }
        xml.push_str("</p:txBody></p:sp>");
    }
    xml.push_str("</p:spTree></p:cSld></p:sld>");
    xml
}

#[test]
fn docx_to_pdf_keeps_paragraph_order() {
    let dir = temp_dir("docx_pdf");
    let input = dir.join("report.docx");
    write_docx(&input, &["First paragraph", "Second paragraph", "Third paragraph"]);

    let outcome = FileConverter::with_defaults()
        .convert(&input, ".pdf")
        .expect("docx to pdf should succeed");
    assert_eq!(outcome.outputs, vec![dir.join("report_converted.pdf")]);

    let pages = pdf_pages(&outcome.outputs[0]);
    assert_eq!(pages.len(), 1);
    assert_in_order(
        &pages[0],
        &["First paragraph", "Second paragraph", "Third paragraph"],
    );
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn docx_to_txt_writes_one_line_per_paragraph() {
    let dir = temp_dir("docx_txt");
    let input = dir.join("notes.docx");
    write_docx(&input, &["Alpha", "", "Gamma"]);

    let outcome = FileConverter::with_defaults()
        .convert(&input, "txt")
        .expect("docx to txt should succeed");
    let text = std::fs::read_to_string(dir.join("notes_converted.txt")).expect("read output");
    assert_eq!(outcome.outputs.len(), 1);
    assert_eq!(text, "Alpha\n\nGamma\n");
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn txt_to_pdf_paginates_long_input() {
    let dir = temp_dir("txt_pdf");
    let input = dir.join("long.txt");
    let lines: Vec<String> = (1..=40).map(|i| format!("Line number {}", i)).collect();
    std::fs::write(&input, lines.join("\n")).expect("write txt");

    let outcome = FileConverter::with_defaults()
        .convert(&input, ".PDF")
        .expect("txt to pdf should succeed");
    let pages = pdf_pages(&outcome.outputs[0]);
    assert_eq!(pages.len(), 2);
    assert!(pages[0].contains("Line number 27"));
    assert!(!pages[0].contains("Line number 28"));
    assert!(pages[1].contains("Line number 40"));
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn pdf_to_docx_recovers_lines() {
    let dir = temp_dir("pdf_docx");
    let input = dir.join("memo.txt");
    std::fs::write(&input, "Quarterly summary\n\nRevenue grew\n").expect("write txt");

    let converter = FileConverter::with_defaults();
    let pdf = converter.convert(&input, ".pdf").expect("txt to pdf").outputs;
    let docx = converter.convert(&pdf[0], ".docx").expect("pdf to docx").outputs;
    assert_eq!(docx, vec![dir.join("memo_converted_converted.docx")]);

    let txt = converter.convert(&docx[0], ".txt").expect("docx to txt").outputs;
    let text = std::fs::read_to_string(&txt[0]).expect("read txt");
    assert_eq!(text, "Quarterly summary\nRevenue grew\n");
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn png_to_pdf_is_single_image_page() {
    let dir = temp_dir("png_pdf");
    let input = dir.join("photo.png");
    image::RgbaImage::from_pixel(30, 20, image::Rgba([10, 20, 30, 255]))
        .save(&input)
        .expect("write png");

    let outcome = FileConverter::with_defaults()
        .convert(&input, ".pdf")
        .expect("png to pdf should succeed");
    assert_eq!(outcome.outputs, vec![dir.join("photo_converted.pdf")]);

    let doc = lopdf::Document::load(&outcome.outputs[0]).expect("readable pdf");
    assert_eq!(doc.get_pages().len(), 1);
    let widths: Vec<i64> = doc
        .objects
        .values()
        .filter_map(|obj| obj.as_stream().ok())
        .filter(|stream| {
            stream
                .dict
                .get(b"Subtype")
                .and_then(|s| s.as_name())
                .map_or(false, |name| name == b"Image")
        })
        .filter_map(|stream| stream.dict.get(b"Width").and_then(|w| w.as_i64()).ok())
        .collect();
    assert_eq!(widths, vec![30]);
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn jpeg_to_pdf_accepts_both_extensions() {
    let dir = temp_dir("jpg_pdf");
    let converter = FileConverter::with_defaults();

    for (name, expected) in [
        ("photo.jpg", "photo_converted.pdf"),
        ("scan.jpeg", "scan_converted.pdf"),
    ] {
        let input = dir.join(name);
        image::RgbImage::from_pixel(24, 16, image::Rgb([200, 100, 50]))
            .save(&input)
            .expect("write jpeg");

        let outcome = converter
            .convert(&input, ".pdf")
            .unwrap_or_else(|e| panic!("{} to pdf should succeed: {}", name, e));
        assert_eq!(outcome.outputs, vec![dir.join(expected)]);

        let doc = lopdf::Document::load(&outcome.outputs[0]).expect("readable pdf");
        assert_eq!(doc.get_pages().len(), 1, "{}", name);
    }
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn csv_round_trips_through_xlsx() {
    let dir = temp_dir("csv_xlsx");
    let input = dir.join("table.csv");
    let original = "id,name,score,active\n1,Ann,9.5,true\n2,Bob,,false\n3,\"Lee, Jr\",7,true\n";
    std::fs::write(&input, original).expect("write csv");

    let converter = FileConverter::with_defaults();
    let xlsx = converter.convert(&input, ".xlsx").expect("csv to xlsx").outputs;
    assert_eq!(xlsx, vec![dir.join("table_converted.xlsx")]);
    let csv_out = converter.convert(&xlsx[0], ".csv").expect("xlsx to csv").outputs;

    let mut original_rows = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_reader(original.as_bytes());
    let mut round_rows = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_path(&csv_out[0])
        .expect("open csv");
    let expected: Vec<Vec<String>> = original_rows
        .records()
        .map(|r| r.expect("row").iter().map(String::from).collect())
        .collect();
    let actual: Vec<Vec<String>> = round_rows
        .records()
        .map(|r| r.expect("row").iter().map(String::from).collect())
        .collect();
    assert_eq!(actual, expected);
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn pptx_slides_become_pages_in_presentation_order() {
    let dir = temp_dir("pptx_pdf");
    let input = dir.join("deck.pptx");
    let presentation = r#"<?xml version="1.0" encoding="UTF-8"?><p:presentation xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><p:sldIdLst><p:sldId id="256" r:id="rId3"/><p:sldId id="257" r:id="rId2"/></p:sldIdLst></p:presentation>"#;
    let rels = r#"<?xml version="1.0" encoding="UTF-8"?><Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide" Target="slides/slide1.xml"/><Relationship Id="rId3" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide" Target="slides/slide2.xml"/></Relationships>"#;
    let slide1 = slide_xml(&[&["Closing slide"]]);
    let slide2 = slide_xml(&[&["Opening title"], &["Point one", "Point two"]]);
    write_zip(
        &input,
        &[
            ("ppt/presentation.xml", presentation),
            ("ppt/_rels/presentation.xml.rels", rels),
            ("ppt/slides/slide1.xml", slide1.as_str()),
            ("ppt/slides/slide2.xml", slide2.as_str()),
        ],
    );

    let outcome = FileConverter::with_defaults()
        .convert(&input, ".pdf")
        .expect("pptx to pdf should succeed");
    let pages = pdf_pages(&outcome.outputs[0]);
    assert_eq!(pages.len(), 2);
    assert_in_order(&pages[0], &["Opening title", "Point one", "Point two"]);
    assert!(pages[1].contains("Closing slide"));
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn epub_chapters_flow_in_spine_order() {
    let dir = temp_dir("epub_pdf");
    let input = dir.join("book.epub");
    let container = r#"<?xml version="1.0"?><container version="1.0" xmlns="urn:oasis:names:tc:opendocument:xmlns:container"><rootfiles><rootfile full-path="OEBPS/content.opf" media-type="application/oebps-package+xml"/></rootfiles></container>"#;
    let opf = r#"<?xml version="1.0" encoding="UTF-8"?><package xmlns="http://www.idpf.org/2007/opf" version="2.0" unique-identifier="id"><metadata xmlns:dc="http://purl.org/dc/elements/1.1/"><dc:title>Sample</dc:title><dc:identifier id="id">sample-book</dc:identifier><dc:language>en</dc:language></metadata><manifest><item id="c1" href="one.xhtml" media-type="application/xhtml+xml"/><item id="c2" href="two.xhtml" media-type="application/xhtml+xml"/></manifest><spine><itemref idref="c2"/><itemref idref="c1"/></spine></package>"#;
    let chapter = |title: &str, body: &str| {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?><html xmlns="http://www.w3.org/1999/xhtml"><head><title>{0}</title></head><body><h1>{0}</h1><p>{1}</p></body></html>"#,
            title, body
        )
    };
    let one = chapter("Chapter Two", "The end of the story.");
    let two = chapter("Chapter One", "Once upon a time.");
    write_zip(
        &input,
        &[
            ("mimetype", "application/epub+zip"),
            ("META-INF/container.xml", container),
            ("OEBPS/content.opf", opf),
            ("OEBPS/one.xhtml", one.as_str()),
            ("OEBPS/two.xhtml", two.as_str()),
        ],
    );

    let outcome = FileConverter::with_defaults()
        .convert(&input, ".pdf")
        .expect("epub to pdf should succeed");
    let text = pdf_pages(&outcome.outputs[0]).join("\n");
    assert_in_order(
        &text,
        &["Chapter One", "Once upon a time.", "Chapter Two", "The end of the story."],
    );
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn unsupported_pairs_write_nothing() {
    let dir = temp_dir("unsupported");
    let input = dir.join("song.mp3");
    std::fs::write(&input, b"ID3").expect("write mp3");

    let err = FileConverter::with_defaults()
        .convert(&input, ".pdf")
        .expect_err("mp3 to pdf is unsupported");
    assert_eq!(err.to_string(), "Conversion from .mp3 to .pdf is not supported.");
    assert!(!dir.join("song_converted.pdf").exists());
    let entries = std::fs::read_dir(&dir).expect("read dir").count();
    assert_eq!(entries, 1);
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn keep_existing_never_overwrites() {
    let dir = temp_dir("keep_existing");
    let input = dir.join("notes.txt");
    std::fs::write(&input, "hello").expect("write txt");
    std::fs::write(dir.join("notes_converted.pdf"), b"previous").expect("write old output");

    let converter = FileConverter::new(ConvertOptions {
        collision: CollisionPolicy::KeepExisting,
        ..Default::default()
    });
    let first = converter.convert(&input, ".pdf").expect("first conversion");
    let second = converter.convert(&input, ".pdf").expect("second conversion");

    assert_eq!(first.outputs, vec![dir.join("notes_converted(2).pdf")]);
    assert_eq!(second.outputs, vec![dir.join("notes_converted(3).pdf")]);
    assert_eq!(
        std::fs::read(dir.join("notes_converted.pdf")).expect("old output"),
        b"previous".to_vec()
    );
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn overwrite_replaces_previous_output() {
    let dir = temp_dir("overwrite");
    let input = dir.join("notes.txt");
    std::fs::write(&input, "hello").expect("write txt");
    std::fs::write(dir.join("notes_converted.pdf"), b"previous").expect("write old output");

    let outcome = FileConverter::with_defaults()
        .convert(&input, ".pdf")
        .expect("conversion");
    assert_eq!(outcome.outputs, vec![dir.join("notes_converted.pdf")]);
    assert_eq!(pdf_pages(&outcome.outputs[0]).len(), 1);
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn invalid_image_is_reported() {
    let dir = temp_dir("bad_png");
    let input = dir.join("broken.png");
    std::fs::write(&input, b"not a png").expect("write");
    let err = FileConverter::with_defaults()
        .convert(&input, ".pdf")
        .expect_err("broken image");
    assert!(matches!(err, Error::Image(_)));
    assert_eq!(err.title(), "Conversion Error");
    let _ = std::fs::remove_dir_all(&dir);
}

fn write_tone_wav(path: &Path, seconds: u32) {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: 44100,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(path, spec).expect("create wav");
    for i in 0..(44100 * seconds) {
        let t = i as f32 / 44100.0;
        let sample = (t * 440.0 * std::f32::consts::TAU).sin() * 8000.0;
        writer.write_sample(sample as i16).expect("write sample");
    }
    writer.finalize().expect("finalize wav");
}

fn ffmpeg_available() -> bool {
    std::process::Command::new("ffmpeg")
        .arg("-version")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

#[test]
fn wav_to_mp3_and_back() {
    if !ffmpeg_available() {
        eprintln!("skipping: ffmpeg not available");
        return;
    }
    let dir = temp_dir("wav_mp3");
    let input = dir.join("tone.wav");
    write_tone_wav(&input, 1);

    let converter = FileConverter::with_defaults();
    let mp3 = converter.convert(&input, ".mp3").expect("wav to mp3").outputs;
    assert_eq!(mp3, vec![dir.join("tone_converted.mp3")]);

    let wav = converter.convert(&mp3[0], ".wav").expect("mp3 to wav").outputs;
    let reader = hound::WavReader::open(&wav[0]).expect("decoded wav");
    let spec = reader.spec();
    assert_eq!(spec.channels, 1);
    assert_eq!(spec.sample_rate, 44100);
    assert_eq!(spec.bits_per_sample, 16);
    assert!(reader.duration() > 0);
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn mp4_audio_track_becomes_mp3() {
    if !ffmpeg_available() {
        eprintln!("skipping: ffmpeg not available");
        return;
    }
    let dir = temp_dir("mp4_mp3");
    let input = dir.join("clip.mp4");
    let fixture = std::process::Command::new("ffmpeg")
        .args(["-hide_banner", "-loglevel", "error", "-y"])
        .args(["-f", "lavfi", "-i", "sine=frequency=440:duration=1"])
        .args(["-f", "lavfi", "-i", "color=c=black:s=64x64:d=1"])
        .args(["-shortest", "-c:v", "mpeg4", "-c:a", "aac"])
        .arg(&input)
        .output();
    if !fixture.map(|o| o.status.success()).unwrap_or(false) {
        eprintln!("skipping: ffmpeg could not build an mp4 fixture");
        let _ = std::fs::remove_dir_all(&dir);
        return;
    }

    let converter = FileConverter::with_defaults();
    let mp3 = converter.convert(&input, ".mp3").expect("mp4 to mp3").outputs;
    assert_eq!(mp3, vec![dir.join("clip_converted.mp3")]);

    let wav = converter.convert(&mp3[0], ".wav").expect("mp3 to wav").outputs;
    let reader = hound::WavReader::open(&wav[0]).expect("decoded wav");
    assert!(reader.duration() > 0);
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn pdf_pages_become_numbered_images() {
    let dir = temp_dir("pdf_png");
    let input = dir.join("scan.txt");
    let lines: Vec<String> = (0..60).map(|i| format!("row {}", i)).collect();
    std::fs::write(&input, lines.join("\n")).expect("write txt");

    let converter = FileConverter::new(ConvertOptions {
        dpi: 36.0,
        ..Default::default()
    });
    let pdf = converter.convert(&input, ".pdf").expect("txt to pdf").outputs;
    assert_eq!(pdf_pages(&pdf[0]).len(), 3);

    let images = match converter.convert(&pdf[0], ".png") {
        Ok(outcome) => outcome.outputs,
        Err(Error::Raster(message)) => {
            eprintln!("skipping: {}", message);
            let _ = std::fs::remove_dir_all(&dir);
            return;
        }
        Err(e) => panic!("unexpected error: {}", e),
    };
    assert_eq!(
        images,
        vec![
            dir.join("scan_converted_converted_1.png"),
            dir.join("scan_converted_converted_2.png"),
            dir.join("scan_converted_converted_3.png"),
        ]
    );
    for path in &images {
        let image = image::open(path).expect("written png");
        assert!(image.width() > 0 && image.height() > image.width());
    }
    let _ = std::fs::remove_dir_all(&dir);
}
