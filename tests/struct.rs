use svtrack::{Chrom, ReaderError, SvType, Track};

#[test]
fn test_chrom_autosomes_round_trip() {
    for number in 1..=22u8 {
        let name = format!("chr{number}");
        let chrom = Chrom::parse(&name, 0).unwrap();
        assert_eq!(chrom.code(), number - 1);
        assert_eq!(chrom.to_string(), name);
    }
}

#[test]
fn test_chrom_sex_chromosomes_round_trip() {
    let x = Chrom::parse("chrX", 0).unwrap();
    assert_eq!(x, Chrom::X);
    assert_eq!(x.code(), 22);
    assert_eq!(x.to_string(), "chrX");

    let y = Chrom::parse("chrY", 0).unwrap();
    assert_eq!(y, Chrom::Y);
    assert_eq!(y.code(), 23);
    assert_eq!(y.to_string(), "chrY");
}

#[test]
fn test_chrom_reserved_codes_collapse_to_unknown() {
    assert_eq!(Chrom::from_code(24).to_string(), "chrUn");
    assert_eq!(Chrom::from_code(200).to_string(), "chrUn");
    assert!(Chrom::from_code(24).is_unknown());
    assert!(!Chrom::from_code(21).is_unknown());
}

#[test]
fn test_chrom_parse_rejects_missing_prefix() {
    let err = Chrom::parse("7", 1).unwrap_err();
    assert!(matches!(err, ReaderError::InvalidField { field: "chrom", .. }));

    let err = Chrom::parse("scaffold7", 1).unwrap_err();
    assert!(matches!(err, ReaderError::InvalidField { field: "chrom", .. }));
}

#[test]
fn test_chrom_parse_rejects_bad_suffix() {
    assert!(Chrom::parse("chrZ", 0).is_err());
    assert!(Chrom::parse("chr", 0).is_err());
    assert!(Chrom::parse("chr0", 0).is_err());
    assert!(Chrom::parse("chr-1", 0).is_err());
    assert!(Chrom::parse("chrx", 0).is_err());
}

#[test]
fn test_svtype_parse_is_total() {
    assert_eq!(SvType::parse("DEL"), SvType::Del);
    assert_eq!(SvType::parse("INS"), SvType::Ins);
    assert_eq!(SvType::parse(""), SvType::Misc);
    assert_eq!(SvType::parse("XYZ"), SvType::Misc);
    assert_eq!(SvType::parse("del"), SvType::Misc);
    assert_eq!(SvType::parse("DELETION"), SvType::Misc);
}

#[test]
fn test_svtype_default_and_display() {
    assert_eq!(SvType::default(), SvType::Misc);
    assert_eq!(SvType::Misc.to_string(), "MISC");
    assert_eq!(SvType::Del.to_string(), "DEL");
    assert_eq!(SvType::Ins.to_string(), "INS");
}

#[test]
fn test_track_from_name() {
    let track = Track::from_name("label@chr7_100_200").unwrap();
    assert_eq!(track.chrom, Chrom::parse("chr7", 0).unwrap());
    assert_eq!(track.begin, 100);
    assert_eq!(track.end, 200);
    assert_eq!(track.svtype, SvType::Misc);
    assert_eq!(track.svlen, None);
    assert_eq!(track.seq, None);
}

#[test]
fn test_track_from_name_ignores_extra_tokens() {
    let track = Track::from_name("label@chrX_5_10_DEL_whatever").unwrap();
    assert_eq!(track.chrom, Chrom::X);
    assert_eq!(track.begin, 5);
    assert_eq!(track.end, 10);
    assert_eq!(track.svtype, SvType::Misc);
}

#[test]
fn test_track_from_name_too_few_tokens() {
    let err = Track::from_name("label@chr7_100").unwrap_err();
    assert!(matches!(err, ReaderError::MalformedName { .. }));
}

#[test]
fn test_track_from_name_missing_separator() {
    let err = Track::from_name("chr7_100_200").unwrap_err();
    assert!(matches!(err, ReaderError::MalformedName { .. }));
}

#[test]
fn test_track_from_name_invalid_bounds() {
    let err = Track::from_name("label@chr7_abc_200").unwrap_err();
    assert!(matches!(err, ReaderError::InvalidField { field: "begin", .. }));

    let err = Track::from_name("label@chr7_100_xyz").unwrap_err();
    assert!(matches!(err, ReaderError::InvalidField { field: "end", .. }));
}

#[test]
fn test_track_from_name_invalid_chromosome() {
    let err = Track::from_name("label@contig9_100_200").unwrap_err();
    assert!(matches!(err, ReaderError::InvalidField { field: "chrom", .. }));
}

#[test]
fn test_track_span_is_empty() {
    let track = Track::from_coords(Chrom::parse("chr1", 0).unwrap(), 10, 20);
    assert_eq!(track.span(), 10);
    assert!(!track.is_empty());

    let empty = Track::from_coords(Chrom::parse("chr1", 0).unwrap(), 10, 10);
    assert_eq!(empty.span(), 0);
    assert!(empty.is_empty());

    let inverted = Track::from_coords(Chrom::parse("chr1", 0).unwrap(), 20, 10);
    assert_eq!(inverted.span(), 0);
    assert!(inverted.is_empty());
}

#[test]
fn test_track_overlaps() {
    let track = Track::from_coords(Chrom::parse("chr1", 0).unwrap(), 10, 20);

    // Complete overlap
    assert!(track.overlaps(5, 25));
    // Partial overlap (begin)
    assert!(track.overlaps(5, 15));
    // Partial overlap (end)
    assert!(track.overlaps(15, 25));
    // Exact overlap
    assert!(track.overlaps(10, 20));
    // No overlap (before)
    assert!(!track.overlaps(0, 5));
    // No overlap (after)
    assert!(!track.overlaps(25, 30));
    // Touch (begin)
    assert!(!track.overlaps(5, 10));
    // Touch (end)
    assert!(!track.overlaps(20, 25));
}

#[test]
fn test_track_display() {
    let mut track = Track::from_coords(Chrom::parse("chr3", 0).unwrap(), 500, 600);
    assert_eq!(format!("{track}"), "chr3\t500\t600\tMISC");

    track.svtype = SvType::Del;
    track.svlen = Some(100);
    track.seq = Some("ACGT".to_string());
    assert_eq!(format!("{track}"), "chr3\t500\t600\tDEL\t100\tACGT");
}
