//! Integration tests for the imgs2pdf library and CLI

use imgs2pdf::convert::{create_pdf, ConvertOptions};
use imgs2pdf::pdf::{count_pages, page_sizes};
use imgs2pdf::Error;
use image::codecs::gif::GifEncoder;
use image::{Frame, GrayImage, ImageFormat, Luma, Rgb, RgbImage, Rgba, RgbaImage};
use tiff::encoder::{colortype, TiffEncoder};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tempfile::TempDir;

/// Write a solid RGB image; the extension picks the format
fn write_rgb(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
    let path = dir.join(name);
    RgbImage::from_pixel(width, height, Rgb([40, 90, 160]))
        .save(&path)
        .expect("Failed to write test image");
    path
}

fn options(inputs: Vec<PathBuf>, output_dir: &Path, name: &str) -> ConvertOptions {
    ConvertOptions {
        image_paths: inputs,
        output_dir: output_dir.to_path_buf(),
        output_name: name.to_string(),
    }
}

#[test]
fn test_pages_use_max_width_and_max_height() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let wide = write_rgb(temp_dir.path(), "wide.png", 300, 100);
    let tall = write_rgb(temp_dir.path(), "tall.jpg", 120, 400);

    let out_dir = temp_dir.path().join("output");
    let report = create_pdf(&options(vec![wide, tall], &out_dir, "mixed.pdf"))
        .expect("Failed to create PDF");

    assert!(report.output_path.is_absolute());
    assert!(report.output_path.ends_with("output/mixed.pdf"));
    assert_eq!(report.page_count, 2);
    assert_eq!(report.skipped, 0);
    assert_eq!((report.page_size.width, report.page_size.height), (300.0, 400.0));

    let written = out_dir.join("mixed.pdf");
    assert_eq!(count_pages(&written).expect("Failed to count pages"), 2);

    let sizes = page_sizes(&written).expect("Failed to read page sizes");
    for size in sizes {
        assert_eq!((size.width, size.height), (300.0, 400.0));
    }
}

#[test]
fn test_missing_and_directory_inputs_are_skipped() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let first = write_rgb(temp_dir.path(), "1.png", 50, 60);
    let second = write_rgb(temp_dir.path(), "2.bmp", 70, 20);
    let missing = temp_dir.path().join("missing.png");
    let directory = temp_dir.path().join("subdir");
    std::fs::create_dir(&directory).unwrap();

    let out_dir = temp_dir.path().join("out");
    let report = create_pdf(&options(
        vec![first, missing, directory, second],
        &out_dir,
        "skips.pdf",
    ))
    .expect("Failed to create PDF");

    assert_eq!(report.page_count, 2);
    assert_eq!(report.skipped, 2);
    assert_eq!(count_pages(&out_dir.join("skips.pdf")).unwrap(), 2);
}

#[test]
fn test_output_directory_is_created() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let image = write_rgb(temp_dir.path(), "only.png", 10, 10);
    let out_dir = temp_dir.path().join("nested").join("output");

    create_pdf(&options(vec![image], &out_dir, "one.pdf")).expect("Failed to create PDF");

    assert!(out_dir.is_dir());
    assert!(out_dir.join("one.pdf").is_file());
}

#[test]
fn test_gray_and_transparent_images() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");

    let gray = temp_dir.path().join("gray.png");
    GrayImage::from_pixel(20, 30, Luma([128])).save(&gray).unwrap();

    let mut rgba = RgbaImage::from_pixel(40, 10, Rgba([255, 0, 0, 255]));
    rgba.put_pixel(0, 0, Rgba([0, 0, 0, 0]));
    let transparent = temp_dir.path().join("alpha.png");
    rgba.save(&transparent).unwrap();

    let out_dir = temp_dir.path().join("output");
    let report = create_pdf(&options(vec![gray, transparent], &out_dir, "kinds.pdf"))
        .expect("Failed to create PDF");

    assert_eq!(report.page_count, 2);
    assert_eq!((report.page_size.width, report.page_size.height), (40.0, 30.0));
}

#[test]
fn test_format_comes_from_contents_not_extension() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let small = write_rgb(temp_dir.path(), "small.png", 50, 50);

    let big = temp_dir.path().join("big.jpg");
    RgbImage::new(200, 300).save_with_format(&big, ImageFormat::Png).unwrap();
    let bare = temp_dir.path().join("scan");
    RgbImage::new(80, 20).save_with_format(&bare, ImageFormat::Png).unwrap();

    let out_dir = temp_dir.path().join("output");
    let report = create_pdf(&options(vec![small, big, bare], &out_dir, "mixed.pdf"))
        .expect("Failed to create PDF");

    assert_eq!(report.page_count, 3);
    assert_eq!((report.page_size.width, report.page_size.height), (200.0, 300.0));

    // A lone extensionless file works too
    let bare_only = temp_dir.path().join("scan");
    let report = create_pdf(&options(vec![bare_only], &out_dir, "bare.pdf"))
        .expect("Failed to create PDF from extensionless file");
    assert_eq!((report.page_size.width, report.page_size.height), (80.0, 20.0));
}

#[test]
fn test_every_tiff_page_and_gif_frame_becomes_a_page() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");

    let tiff_path = temp_dir.path().join("scan.tif");
    {
        let file = std::fs::File::create(&tiff_path).unwrap();
        let mut encoder = TiffEncoder::new(file).unwrap();
        encoder.write_image::<colortype::RGB8>(60, 20, &vec![128; 60 * 20 * 3]).unwrap();
        encoder.write_image::<colortype::RGB8>(30, 90, &vec![64; 30 * 90 * 3]).unwrap();
    }

    let gif_path = temp_dir.path().join("anim.gif");
    {
        let file = std::fs::File::create(&gif_path).unwrap();
        let mut encoder = GifEncoder::new(file);
        for shade in [10u8, 240] {
            let frame = RgbaImage::from_pixel(16, 16, Rgba([shade, shade, shade, 255]));
            encoder.encode_frame(Frame::new(frame)).unwrap();
        }
    }

    let out_dir = temp_dir.path().join("output");
    let report = create_pdf(&options(vec![tiff_path, gif_path], &out_dir, "frames.pdf"))
        .expect("Failed to create PDF");

    // The second TIFF page is the tallest frame
    assert_eq!((report.page_size.width, report.page_size.height), (60.0, 90.0));
    assert_eq!(report.page_count, 4);

    let written = out_dir.join("frames.pdf");
    assert_eq!(count_pages(&written).unwrap(), 4);
    for size in page_sizes(&written).unwrap() {
        assert_eq!((size.width, size.height), (60.0, 90.0));
    }
}

#[test]
fn test_all_inputs_invalid() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let out_dir = temp_dir.path().join("output");

    let result = create_pdf(&options(
        vec![PathBuf::from("nonexistent.png")],
        &out_dir,
        "none.pdf",
    ));

    let err = result.expect_err("Should fail when every input is skipped");
    assert!(matches!(err, Error::NoValidImages));
    assert!(!out_dir.exists(), "No output directory should be created");
}

#[test]
fn test_unreadable_dimensions() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let bogus = temp_dir.path().join("bogus.png");
    std::fs::write(&bogus, b"plain text, not an image").unwrap();

    let result = create_pdf(&options(vec![bogus], &temp_dir.path().join("output"), "x.pdf"));
    assert!(matches!(result.unwrap_err(), Error::UnknownDimensions));
}

#[test]
fn test_undecodable_image_fails_conversion() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let good = write_rgb(temp_dir.path(), "good.png", 10, 10);
    let bogus = temp_dir.path().join("bogus.png");
    std::fs::write(&bogus, b"plain text, not an image").unwrap();

    let out_dir = temp_dir.path().join("output");
    let result = create_pdf(&options(vec![good, bogus], &out_dir, "x.pdf"));

    assert!(matches!(result.unwrap_err(), Error::Image(_)));
    assert!(!out_dir.join("x.pdf").exists());
}

/// Run the binary in `dir`, feeding `stdin`, and return (status, stdout, stderr)
fn run_cli(dir: &Path, stdin: &str) -> (i32, String, String) {
    let mut child = Command::new(env!("CARGO_BIN_EXE_imgs2pdf"))
        .current_dir(dir)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to start imgs2pdf");

    child
        .stdin
        .take()
        .expect("stdin is piped")
        .write_all(stdin.as_bytes())
        .expect("Failed to write stdin");

    let output = child.wait_with_output().expect("Failed to wait for imgs2pdf");
    (
        output.status.code().unwrap_or(-1),
        String::from_utf8_lossy(&output.stdout).into_owned(),
        String::from_utf8_lossy(&output.stderr).into_owned(),
    )
}

#[test]
fn test_cli_interactive_session() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let a = write_rgb(temp_dir.path(), "a.png", 64, 32);
    let b = write_rgb(temp_dir.path(), "b.png", 16, 48);

    let stdin = format!(
        "\"{}\"\n'{}'\n{}\n\nscans\n",
        a.display(),
        b.display(),
        temp_dir.path().join("missing.png").display(),
    );
    let (status, stdout, stderr) = run_cli(temp_dir.path(), &stdin);

    assert_eq!(status, 0, "stderr: {}", stderr);
    assert!(stdout.starts_with("Image to PDF Converter"));
    assert!(stdout.contains("Successfully created PDF:"));
    assert!(stderr.contains("Warning: File not found"));
    assert!(stderr.contains("Maximum dimensions: 64 x 48 pixels"));

    let written = temp_dir.path().join("output").join("scans.pdf");
    assert_eq!(count_pages(&written).unwrap(), 2);
}

#[test]
fn test_cli_default_name_and_custom_dir() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let a = write_rgb(temp_dir.path(), "a.png", 8, 8);

    let mut child = Command::new(env!("CARGO_BIN_EXE_imgs2pdf"))
        .args(["--output-dir", "pdfs"])
        .current_dir(temp_dir.path())
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .expect("Failed to start imgs2pdf");
    child
        .stdin
        .take()
        .unwrap()
        .write_all(format!("{}\n\n\n", a.display()).as_bytes())
        .unwrap();
    assert!(child.wait().unwrap().success());

    assert!(temp_dir.path().join("pdfs").join("untitled.pdf").is_file());
}

#[test]
fn test_cli_no_paths_exits_cleanly() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let (status, _stdout, stderr) = run_cli(temp_dir.path(), "\n");

    assert_eq!(status, 0);
    assert!(stderr.contains("No image paths provided. Exiting."));
    assert!(!temp_dir.path().join("output").exists());
}

#[test]
fn test_cli_reports_failure() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let (status, _stdout, stderr) = run_cli(temp_dir.path(), "nothing-here.png\n\nout\n");

    assert_eq!(status, 1);
    assert!(stderr.contains("No valid image files found."));
}

#[test]
fn test_cli_verbose_wins_over_rust_log() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let a = write_rgb(temp_dir.path(), "a.png", 8, 8);

    let mut child = Command::new(env!("CARGO_BIN_EXE_imgs2pdf"))
        .arg("-v")
        .env("RUST_LOG", "error")
        .current_dir(temp_dir.path())
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to start imgs2pdf");
    child
        .stdin
        .take()
        .unwrap()
        .write_all(format!("{}\n\nv\n", a.display()).as_bytes())
        .unwrap();
    let output = child.wait_with_output().unwrap();
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(output.status.success());
    assert!(stderr.contains("Maximum dimensions: 8 x 8 pixels"), "stderr: {}", stderr);
    assert!(stderr.contains("Embedding"), "stderr: {}", stderr);
}
