//! Caption Formatter
//!
//! 物件1件（`Row`）から、SNS投稿用の固定テンプレートのキャプションを生成する。
//! 純粋関数のみで構成され、エラーを返さない。

use crate::types::{Listing, Row};

const HEADER: &str = "No brokerage offer 🥳🥳🥳";

const CONTACT_HEADING: &str = "🤝 Contact for visit:";
const OFFICE_PHONE: &str = "📞 8401647877";
const VISIT_HOURS: &str = "(Time: 11 am to 6 pm)";

const PROMOTION_BLOCK: [&str; 7] = [
    "To Promote your Property:",
    "📞8401732226",
    "If you like our property tour please follow our account",
    "@cleardeals.ahmedabad.west",
    "@cleardeals.ahmedabad.east",
    "@cleardeals.Pune",
    "@cleardeals.gandhinagar",
];

const HASHTAGS: &str = "#propertytour #cleardeals.ahmedabad.west #cleardeals.ahmedabad.east #cleardeals.Pune cleardeals.gandhinagar #trendyproperty #ahmedabadrealestate #punerealestate #trending #trendingreels #viralreels #Newproperty";

const COMMERCIAL: &str = "Commercial";
const COMMERCIAL_FALLBACK: &str = "Commercial Space";
const RESIDENTIAL_FALLBACK: &str = "Property";

/// 行からキャプションを生成
///
/// 欠損している列は空文字列として扱われ、決して失敗しません。
///
/// ```rust
/// use listing_caption::{generate_caption, Row};
///
/// let row = Row::from_pairs([
///     ("Property_Type", "Residential"),
///     ("Residential-Property", "Flat-Apartment-Tower"),
///     ("BHK", "2"),
///     ("Location", "Pune-Kothrud"),
///     ("City1", "Pune"),
/// ]);
/// let caption = generate_caption(&row);
/// assert_eq!(
///     caption.lines().nth(1),
///     Some("🏬 Amazing 2 Apartment sell at Kothrud ,Pune")
/// );
/// ```
pub fn generate_caption(row: &Row) -> String {
    render_listing(&Listing::from_row(row))
}

/// 型付きビューからキャプションを生成
pub(crate) fn render_listing(listing: &Listing) -> String {
    let mut lines: Vec<String> = Vec::with_capacity(21);

    lines.push(HEADER.to_string());
    lines.push(headline(listing));
    lines.push(String::new());

    lines.push(format!(
        "👉 Super Built up Plot Space : {}, Super Built up Construction Area : {}",
        listing.plot_space, listing.construction_area
    ));
    lines.push(format!("👉 {}", listing.furniture_details));
    lines.push(format!("👉 Current Status : {}", listing.current_status));
    lines.push(String::new());

    lines.push(CONTACT_HEADING.to_string());
    lines.push(format!("📞 {}", listing.mobile_number));
    lines.push(OFFICE_PHONE.to_string());
    lines.push(VISIT_HOURS.to_string());
    lines.push(String::new());

    lines.extend(PROMOTION_BLOCK.iter().map(|s| s.to_string()));
    lines.push(format!("For more details visit: {}", listing.property_link));
    lines.push(HASHTAGS.to_string());

    lines.join("\n")
}

/// 2行目（見出し行）
fn headline(listing: &Listing) -> String {
    format!(
        "🏬 Amazing {} {} sell at {} ,{}",
        unit_descriptor(listing),
        property_description(listing),
        location_fragment(&listing.location),
        listing.city.trim()
    )
}

fn is_commercial(listing: &Listing) -> bool {
    listing.property_type.trim() == COMMERCIAL
}

/// BHK（商業物件では出力しない）
fn unit_descriptor(listing: &Listing) -> &str {
    if is_commercial(listing) {
        ""
    } else {
        &listing.bhk
    }
}

/// 物件種別のラベル
fn property_description(listing: &Listing) -> &str {
    if is_commercial(listing) {
        match listing.commercial_property_type.trim() {
            "Shops-Showrooms" => "Showroom",
            "Office-Space" => "Office Space",
            "" => COMMERCIAL_FALLBACK,
            other => other,
        }
    } else {
        match listing.residential_property.trim() {
            "Flat-Apartment-Tower" => "Apartment",
            "Row-House-Bunglows-Villa-Duplex-Tenament" => "Bunglow",
            "" => RESIDENTIAL_FALLBACK,
            other => other,
        }
    }
}

/// 所在地の末尾セグメント（最後の`-`以降）
fn location_fragment(location: &str) -> &str {
    match location.rsplit_once('-') {
        Some((_, last)) => last.trim(),
        None => location.trim(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CellValue;

    fn commercial(sub_type: &str) -> Listing {
        Listing {
            property_type: "Commercial".to_string(),
            commercial_property_type: sub_type.to_string(),
            ..Default::default()
        }
    }

    fn residential(sub_type: &str) -> Listing {
        Listing {
            property_type: "Residential".to_string(),
            residential_property: sub_type.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_commercial_labels() {
        assert_eq!(property_description(&commercial("Shops-Showrooms")), "Showroom");
        assert_eq!(property_description(&commercial("Office-Space")), "Office Space");
        assert_eq!(property_description(&commercial("Warehouse")), "Warehouse");
        assert_eq!(property_description(&commercial("")), "Commercial Space");
        assert_eq!(property_description(&commercial("   ")), "Commercial Space");
    }

    #[test]
    fn test_residential_labels() {
        assert_eq!(
            property_description(&residential("Flat-Apartment-Tower")),
            "Apartment"
        );
        assert_eq!(
            property_description(&residential("Row-House-Bunglows-Villa-Duplex-Tenament")),
            "Bunglow"
        );
        assert_eq!(property_description(&residential("Plot")), "Plot");
        assert_eq!(property_description(&residential("")), "Property");
    }

    #[test]
    fn test_commercial_match_is_case_sensitive() {
        let mut listing = commercial("Office-Space");
        listing.property_type = "commercial".to_string();
        listing.residential_property = "Flat-Apartment-Tower".to_string();
        assert_eq!(property_description(&listing), "Apartment");
    }

    #[test]
    fn test_property_type_is_trimmed() {
        let mut listing = commercial("Shops-Showrooms");
        listing.property_type = "  Commercial ".to_string();
        assert_eq!(property_description(&listing), "Showroom");
    }

    #[test]
    fn test_residential_sub_type_ignored_for_commercial() {
        let mut listing = commercial("");
        listing.residential_property = "Flat-Apartment-Tower".to_string();
        assert_eq!(property_description(&listing), "Commercial Space");
    }

    #[test]
    fn test_unit_descriptor_suppressed_for_commercial() {
        let mut listing = commercial("Office-Space");
        listing.bhk = "3".to_string();
        assert_eq!(unit_descriptor(&listing), "");

        let mut listing = residential("Flat-Apartment-Tower");
        listing.bhk = "3 BHK".to_string();
        assert_eq!(unit_descriptor(&listing), "3 BHK");
    }

    #[test]
    fn test_location_fragment() {
        assert_eq!(location_fragment("Ahmedabad-Bopal"), "Bopal");
        assert_eq!(location_fragment("Pune-West-Kothrud "), "Kothrud");
        assert_eq!(location_fragment("  Satellite  "), "Satellite");
        assert_eq!(location_fragment("Ahmedabad-"), "");
        assert_eq!(location_fragment("-B"), "B");
        assert_eq!(location_fragment(""), "");
    }

    #[test]
    fn test_commercial_headline() {
        let row = Row::from_pairs([
            ("Property_Type", "Commercial"),
            ("Commercial-Property-Type", "Office-Space"),
            ("Location", "Ahmedabad-Bopal"),
            ("City1", "Ahmedabad"),
            ("BHK", "3"),
        ]);
        let caption = generate_caption(&row);
        assert_eq!(
            caption.lines().nth(1),
            Some("🏬 Amazing  Office Space sell at Bopal ,Ahmedabad")
        );
    }

    #[test]
    fn test_residential_headline() {
        let row = Row::from_pairs([
            ("Property_Type", "Residential"),
            ("Residential-Property", "Flat-Apartment-Tower"),
            ("BHK", "2"),
            ("Location", "Pune-Kothrud"),
            ("City1", "Pune"),
        ]);
        let caption = generate_caption(&row);
        assert_eq!(
            caption.lines().nth(1),
            Some("🏬 Amazing 2 Apartment sell at Kothrud ,Pune")
        );
    }

    #[test]
    fn test_numeric_cells_render_without_decimal() {
        let row = Row::from_pairs([
            ("BHK", CellValue::Number(2.0)),
            ("JRM-Mobile-Number", CellValue::Number(9876543210.0)),
        ]);
        let caption = generate_caption(&row);
        assert!(caption.contains("🏬 Amazing 2 Property sell at  ,"));
        assert!(caption.contains("📞 9876543210\n"));
    }

    #[test]
    fn test_full_caption_layout() {
        let row = Row::from_pairs([
            ("Property_Type", "Residential"),
            ("Residential-Property", "Row-House-Bunglows-Villa-Duplex-Tenament"),
            ("BHK", "4"),
            ("Location", "Gandhinagar-Sargasan"),
            ("City1", " Gandhinagar "),
            ("Super-Built-up-Plot-Space", "250 sq yd"),
            ("Super-Built-up-Construction-Area", "3200 sq ft"),
            ("Furniture-Details", "Semi Furnished"),
            ("Current-Status", "Ready to move"),
            ("JRM-Mobile-Number", "9999900000"),
            ("Property-Link", "https://example.com/p/42"),
        ]);

        let expected = [
            "No brokerage offer 🥳🥳🥳",
            "🏬 Amazing 4 Bunglow sell at Sargasan ,Gandhinagar",
            "",
            "👉 Super Built up Plot Space : 250 sq yd, Super Built up Construction Area : 3200 sq ft",
            "👉 Semi Furnished",
            "👉 Current Status : Ready to move",
            "",
            "🤝 Contact for visit:",
            "📞 9999900000",
            "📞 8401647877",
            "(Time: 11 am to 6 pm)",
            "",
            "To Promote your Property:",
            "📞8401732226",
            "If you like our property tour please follow our account",
            "@cleardeals.ahmedabad.west",
            "@cleardeals.ahmedabad.east",
            "@cleardeals.Pune",
            "@cleardeals.gandhinagar",
            "For more details visit: https://example.com/p/42",
            HASHTAGS,
        ]
        .join("\n");

        assert_eq!(generate_caption(&row), expected);
    }

    #[test]
    fn test_empty_row_uses_empty_substitutions() {
        let caption = generate_caption(&Row::new());
        let lines: Vec<&str> = caption.lines().collect();
        assert_eq!(lines[1], "🏬 Amazing  Property sell at  ,");
        assert_eq!(
            lines[3],
            "👉 Super Built up Plot Space : , Super Built up Construction Area : "
        );
        assert_eq!(lines[4], "👉 ");
        assert_eq!(lines[8], "📞 ");
        assert_eq!(lines[19], "For more details visit: ");
        assert!(!caption.contains("None"));
        assert!(!caption.contains("nan"));
    }

    #[allow(unused_doc_comments)]
    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        /// 固定行の位置（0始まり）と内容
        fn fixed_lines() -> Vec<(usize, &'static str)> {
            let mut fixed = vec![
                (0, HEADER),
                (2, ""),
                (6, ""),
                (7, CONTACT_HEADING),
                (9, OFFICE_PHONE),
                (10, VISIT_HOURS),
                (11, ""),
            ];
            fixed.extend(PROMOTION_BLOCK.iter().enumerate().map(|(i, s)| (12 + i, *s)));
            fixed.push((20, HASHTAGS));
            fixed
        }

        fn field_value() -> impl Strategy<Value = String> {
            "[A-Za-z0-9 ./]{0,16}"
        }

        /// 固定行は行の内容に関係なく常にそのまま出力される
        proptest! {
            #[test]
            fn test_fixed_lines_are_verbatim(
                property_type in prop_oneof![Just("Commercial".to_string()), field_value()],
                sub_type in field_value(),
                bhk in field_value(),
                location in "[A-Za-z -]{0,24}",
                city in field_value(),
                furniture in field_value(),
                link in field_value(),
            ) {
                let row = Row::from_pairs([
                    ("Property_Type", property_type.as_str()),
                    ("Commercial-Property-Type", sub_type.as_str()),
                    ("Residential-Property", sub_type.as_str()),
                    ("BHK", bhk.as_str()),
                    ("Location", location.as_str()),
                    ("City1", city.as_str()),
                    ("Furniture-Details", furniture.as_str()),
                    ("Property-Link", link.as_str()),
                ]);
                let caption = generate_caption(&row);
                let lines: Vec<&str> = caption.split('\n').collect();

                prop_assert_eq!(lines.len(), 21);
                for (idx, text) in fixed_lines() {
                    prop_assert_eq!(lines[idx], text);
                }
            }
        }

        /// ハイフンを含む所在地は、最後のハイフン以降をそのまま（トリムのみ）使う
        proptest! {
            #[test]
            fn test_location_after_last_hyphen(
                prefix in "[A-Za-z ]{0,10}",
                middle in "[A-Za-z -]{0,10}",
                suffix in "[A-Za-z ]{0,10}",
            ) {
                let location = format!("{}-{}-{}", prefix, middle, suffix);
                prop_assert_eq!(location_fragment(&location), suffix.trim());
            }
        }

        /// ハイフンを含まない所在地はトリムした値そのもの
        proptest! {
            #[test]
            fn test_location_without_hyphen(location in "[A-Za-z ]{0,20}") {
                prop_assert_eq!(location_fragment(&location), location.trim());
            }
        }
    }
}
