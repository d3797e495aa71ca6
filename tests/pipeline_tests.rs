#[cfg(test)]
mod tests {
    use recipe_cart::conversions::{classify_size, convert_recipe_to_purchase};
    use recipe_cart::ingredient_model::{DisplayUnit, SizeMatch};
    use recipe_cart::name_cleaner::clean_ingredient_name;
    use recipe_cart::pipeline::{analyze_ingredient, plan_recipe};
    use recipe_cart::quantity_parser::parse_quantity;
    use recipe_cart::search_query::{build_search_query, QueryOptions};

    fn options() -> QueryOptions {
        QueryOptions::default()
    }

    #[test]
    fn test_packaged_line_end_to_end() {
        let analysis = analyze_ingredient("2 (6 ounce) cans tomato paste", &options());

        let qty = &analysis.quantity;
        assert_eq!(qty.count, Some(2.0));
        assert_eq!(qty.amount, Some(6.0));
        assert_eq!(qty.unit.as_deref(), Some("oz"));
        assert_eq!(qty.container.as_deref(), Some("can"));
        assert_eq!(qty.total_amount, Some(12.0));

        assert_eq!(analysis.cleaned_name, "tomato paste");
        assert_eq!(analysis.search_query, "6 oz can tomato paste");

        let purchase = &analysis.purchase;
        assert_eq!(purchase.ingredient_key, "tomato_paste");
        assert_eq!(purchase.unit, DisplayUnit::Oz);
        assert_eq!(purchase.note.as_deref(), Some("Need 10-14 oz"));
        assert_eq!(purchase.recommendations, vec![12.0, 16.0]);
    }

    #[test]
    fn test_measured_line() {
        let qty = parse_quantity("2 cups minced onion");
        assert_eq!(qty.amount, Some(2.0));
        assert_eq!(qty.unit.as_deref(), Some("cup"));
        assert_eq!(qty.count, Some(1.0));
        assert_eq!(clean_ingredient_name("2 cups minced onion"), "onion");
    }

    #[test]
    fn test_clove_is_a_unit() {
        let qty = parse_quantity("3 cloves garlic");
        assert_eq!(qty.amount, Some(3.0));
        assert_eq!(qty.unit.as_deref(), Some("clove"));
        assert_eq!(qty.count, Some(1.0));
    }

    #[test]
    fn test_count_without_unit_is_unparsed() {
        let analysis = analyze_ingredient("12 lasagna noodles", &options());
        assert!(analysis.quantity.count.is_none());
        assert!(analysis.quantity.amount.is_none());
        assert!(analysis.quantity.unit.is_none());
        assert!(analysis.quantity.container.is_none());
        assert!(analysis.quantity.total_amount.is_none());
        assert_eq!(analysis.cleaned_name, "lasagna noodles");
        assert_eq!(
            analysis.purchase.note.as_deref(),
            Some("Could not determine quantity")
        );
        assert!(analysis.purchase.needed_range.is_none());
    }

    #[test]
    fn test_complex_grammar_for_several_units() {
        for (text, count, amount, unit) in [
            ("3 (14.5 ounce) cans diced tomatoes", 3.0, 14.5, "oz"),
            ("1 (28 oz) can crushed tomatoes", 1.0, 28.0, "oz"),
            ("2 (1 pound) packages ground beef", 2.0, 1.0, "lb"),
            ("4 (8 oz) jars pesto", 4.0, 8.0, "oz"),
        ] {
            let qty = parse_quantity(text);
            assert_eq!(qty.count, Some(count), "{text}");
            assert_eq!(qty.amount, Some(amount), "{text}");
            assert_eq!(qty.unit.as_deref(), Some(unit), "{text}");
            assert_eq!(qty.total_amount, Some(count * amount), "{text}");
        }
    }

    #[test]
    fn test_unit_aliases_share_one_canonical_unit() {
        for alias in ["tablespoon", "tablespoons", "tbsp", "tbs", "Tbsp"] {
            let qty = parse_quantity(&format!("2 {alias} olive oil"));
            assert_eq!(qty.unit.as_deref(), Some("tablespoon"), "{alias}");
        }
        for alias in ["pound", "pounds", "lb", "lbs"] {
            let qty = parse_quantity(&format!("1 {alias} ground beef"));
            assert_eq!(qty.unit.as_deref(), Some("lb"), "{alias}");
        }
    }

    #[test]
    fn test_cleaning_is_idempotent_on_clean_names() {
        for name in ["tomato paste", "onion", "parmesan cheese", "lasagna noodles", "olive oil"] {
            assert_eq!(clean_ingredient_name(name), name);
        }

        for line in ["2 cups minced onion", "1 cup parmesan cheese, divided", "12 lasagna noodles"] {
            let once = clean_ingredient_name(line);
            assert_eq!(clean_ingredient_name(&once), once);
        }
    }

    #[test]
    fn test_degenerate_input_never_fails() {
        for text in ["", "   ", "2", "(optional)", "½", "to taste"] {
            let analysis = analyze_ingredient(text, &options());
            assert_eq!(analysis.original, text);
            let _ = build_search_query(text, &options());
        }
        assert_eq!(clean_ingredient_name("(optional)"), "(optional)");
    }

    #[test]
    fn test_range_fits_perfectly_inside_needed_range() {
        let qty = parse_quantity("2 (6 ounce) cans tomato paste");
        let purchase = convert_recipe_to_purchase(&qty, "tomato paste");
        let (low, high) = purchase.range_in_ounces().unwrap();
        assert!(low <= high);

        for size in [low, (low + high) / 2.0, high] {
            assert_eq!(classify_size(size, (low, high)), Some(SizeMatch::PerfectFit));
        }
        assert_eq!(
            classify_size(low / 2.0, (low, high)),
            Some(SizeMatch::NeedMultiple { count: 2 })
        );
    }

    #[test]
    fn test_large_needs_are_shown_in_pounds() {
        let analysis = analyze_ingredient("2 pounds ground beef", &options());
        let purchase = &analysis.purchase;
        assert_eq!(purchase.unit, DisplayUnit::Lb);
        assert_eq!(purchase.needed, Some(2.0));
        assert_eq!(purchase.note.as_deref(), Some("Need 1.6-2.4 lbs"));
        assert_eq!(purchase.recommendations, vec![32.0, 48.0]);
    }

    #[test]
    fn test_plan_recipe() {
        let lines = vec![
            "2 (6 ounce) cans tomato paste".to_string(),
            String::new(),
            "3 cloves garlic".to_string(),
            "12 lasagna noodles".to_string(),
        ];
        let plan = plan_recipe("lasagna.txt", &lines, &options());

        assert_eq!(plan.reference, "lasagna.txt");
        assert_eq!(plan.ingredients.len(), 3);
        let queries: Vec<&str> = plan
            .ingredients
            .iter()
            .map(|analysis| analysis.search_query.as_str())
            .collect();
        assert_eq!(queries, vec!["6 oz can tomato paste", "garlic", "lasagna noodles"]);
    }

    #[test]
    fn test_plan_serializes_to_json() {
        let plan = plan_recipe("r", ["3 cloves garlic"], &options());
        let json = serde_json::to_value(&plan).unwrap();
        assert_eq!(json["reference"], "r");
        assert_eq!(json["ingredients"][0]["quantity"]["unit"], "clove");
        assert_eq!(json["ingredients"][0]["search_query"], "garlic");
    }
}
