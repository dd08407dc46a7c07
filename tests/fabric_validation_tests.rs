#[cfg(test)]
mod fabric_validation_tests {
    use closfab::fabric::{FabricError, FabricParameters, FabricSummary};
    use closfab::ip::{address_to_integer, integer_to_address, next_subnet, AddressError};

    /// A valid spine-driven fabric: 4 spines x 16 ports, 4 uplinks per leaf
    fn spine_fabric() -> FabricParameters {
        FabricParameters {
            spine_count: Some(4),
            leaf_count: None,
            spine_speed: 40,
            spine_ports: 16,
            leaf_down_speed: 10,
            leaf_down_ports: 48,
            leaf_up_speed: 40,
            leaf_up_ports: 4,
            base_prefix: "192.168/16".to_string(),
            p2p_mask: 31,
            asn: 64512,
            derived: None,
        }
    }

    fn leaf_fabric() -> FabricParameters {
        FabricParameters {
            spine_count: None,
            leaf_count: Some(16),
            ..spine_fabric()
        }
    }

    fn expect_configuration(params: FabricParameters) -> String {
        match params.validate() {
            Err(FabricError::Configuration(msg)) => msg,
            other => panic!("expected configuration error, got {:?}", other),
        }
    }

    fn expect_capacity(params: FabricParameters) -> String {
        match params.validate() {
            Err(FabricError::Capacity(msg)) => msg,
            other => panic!("expected capacity error, got {:?}", other),
        }
    }

    #[test]
    fn test_address_arithmetic_examples() {
        assert_eq!(address_to_integer("192.168.1.1"), Ok(3_232_235_777));
        assert_eq!(integer_to_address(3_232_235_777), "192.168.1.1");
        assert_eq!(next_subnet("192.168.0.0", 24).unwrap(), "192.168.1.0");
        assert_eq!(next_subnet("10.0.0.0", 8).unwrap(), "11.0.0.0");
        assert_eq!(next_subnet("254.0.0.0", 8).unwrap(), "255.0.0.0");
        assert!(matches!(next_subnet("255.0.0.0", 8), Err(AddressError::Range(_))));
    }

    #[test]
    fn test_derive_leaves_from_spines() {
        let fabric = spine_fabric().validate().unwrap();
        assert_eq!(fabric.spine_count, Some(4));
        assert_eq!(fabric.leaf_count, Some(16));
    }

    #[test]
    fn test_derive_spines_from_leaves() {
        let fabric = leaf_fabric().validate().unwrap();
        assert_eq!(fabric.spine_count, Some(4));
        assert_eq!(fabric.leaf_count, Some(16));
    }

    #[test]
    fn test_revalidation_is_a_no_op() {
        let once = spine_fabric().validate().unwrap();
        let twice = once.validate().unwrap();
        assert_eq!(once, twice);

        let once = leaf_fabric().validate().unwrap();
        assert_eq!(once.validate().unwrap(), once);
    }

    #[test]
    fn test_failed_validation_leaves_record_untouched() {
        let params = FabricParameters { asn: 65520, ..spine_fabric() };
        let before = params.clone();
        assert!(params.validate().is_err());
        assert_eq!(params, before);
        assert_eq!(params.leaf_count, None);
    }

    #[test]
    fn test_both_or_neither_dimension_rejected_first() {
        // Every other field is invalid too; the dimension check still wins
        let broken = FabricParameters {
            spine_speed: 0,
            spine_ports: 0,
            leaf_up_ports: 0,
            p2p_mask: 8,
            asn: 0,
            base_prefix: "nonsense".to_string(),
            ..spine_fabric()
        };

        let both = FabricParameters { spine_count: Some(4), leaf_count: Some(16), ..broken.clone() };
        assert!(expect_configuration(both).contains("exactly one of spine count or leaf count"));

        let neither = FabricParameters { spine_count: None, leaf_count: None, ..broken };
        assert!(expect_configuration(neither).contains("exactly one of spine count or leaf count"));
    }

    #[test]
    fn test_minimum_device_counts() {
        let msg = expect_configuration(FabricParameters { spine_count: Some(1), ..spine_fabric() });
        assert!(msg.contains("spine count 1"), "{}", msg);

        let msg = expect_configuration(FabricParameters { leaf_count: Some(1), ..leaf_fabric() });
        assert!(msg.contains("leaf count 1"), "{}", msg);
    }

    #[test]
    fn test_speed_ranges() {
        let msg = expect_configuration(FabricParameters { leaf_down_speed: 401, ..spine_fabric() });
        assert!(msg.contains("leaf down speed"), "{}", msg);

        let msg = expect_configuration(FabricParameters { leaf_up_speed: 0, spine_speed: 0, ..spine_fabric() });
        assert!(msg.contains("leaf up speed"), "{}", msg);

        let msg = expect_configuration(FabricParameters { spine_speed: 500, ..spine_fabric() });
        assert!(msg.contains("spine speed"), "{}", msg);

        // Inclusive bounds
        let edge = FabricParameters { leaf_down_speed: 400, spine_speed: 1, leaf_up_speed: 1, ..spine_fabric() };
        assert!(edge.validate().is_ok());
    }

    #[test]
    fn test_port_minimums() {
        let msg = expect_configuration(FabricParameters { spine_ports: 3, ..spine_fabric() });
        assert!(msg.contains("spine ports"), "{}", msg);

        let msg = expect_configuration(FabricParameters { leaf_up_ports: 1, ..spine_fabric() });
        assert!(msg.contains("leaf up ports"), "{}", msg);
    }

    #[test]
    fn test_speed_mismatch() {
        let msg = expect_configuration(FabricParameters { spine_speed: 40, leaf_up_speed: 10, ..spine_fabric() });
        assert!(msg.contains("does not match"), "{}", msg);
    }

    #[test]
    fn test_p2p_mask_range() {
        for mask in [0u8, 23, 32] {
            let msg = expect_configuration(FabricParameters { p2p_mask: mask, ..spine_fabric() });
            assert!(msg.contains("p2p mask"), "{}", msg);
        }
        for mask in [24u8, 31] {
            assert!(FabricParameters { p2p_mask: mask, ..spine_fabric() }.validate().is_ok());
        }
    }

    #[test]
    fn test_too_many_spines_for_leaf_uplinks() {
        let msg = expect_capacity(FabricParameters { spine_count: Some(5), ..spine_fabric() });
        assert!(msg.contains("spine count 5"), "{}", msg);
        assert!(msg.contains("4 uplink ports"), "{}", msg);
    }

    #[test]
    fn test_too_many_leaves_for_spine_ports() {
        let msg = expect_capacity(FabricParameters { leaf_count: Some(17), ..leaf_fabric() });
        assert!(msg.contains("need 5 spines"), "{}", msg);
        assert!(msg.contains("only 4 uplink ports"), "{}", msg);
        assert!(msg.contains("decrease the leaf count"), "{}", msg);
    }

    #[test]
    fn test_asn_budget() {
        assert!(FabricParameters { asn: 64512, ..spine_fabric() }.validate().is_ok());
        assert!(FabricParameters { asn: 65515, ..spine_fabric() }.validate().is_ok());

        let msg = expect_capacity(FabricParameters { asn: 65520, ..spine_fabric() });
        assert!(msg.contains("AS number 65520"), "{}", msg);
        assert!(msg.contains("20 nodes"), "{}", msg);
        assert!(msg.contains("4 spines, 16 leaves"), "{}", msg);

        let recommended: u32 = msg
            .rsplit("recommended starting AS number: ")
            .next()
            .and_then(|tail| tail.trim().parse().ok())
            .expect("message carries a recommended ASN");
        assert_eq!(recommended, 65513);
        assert!(recommended < 65520);
    }

    #[test]
    fn test_asn_zero_rejected() {
        let msg = expect_configuration(FabricParameters { asn: 0, ..spine_fabric() });
        assert!(msg.contains("autonomous system number 0"), "{}", msg);
    }

    #[test]
    fn test_address_space_exhaustion() {
        let params = FabricParameters {
            base_prefix: "192.168.0.0/30".to_string(),
            p2p_mask: 30,
            ..leaf_fabric()
        };
        let msg = expect_capacity(params);
        assert!(msg.contains("4 spines and 16 leaves"), "{}", msg);
        assert!(msg.contains("64 point-to-point links"), "{}", msg);
        assert!(msg.contains("192.168.0.0/30"), "{}", msg);
        assert!(msg.contains("only 1 /30 subnets"), "{}", msg);
        assert!(msg.contains("192.168.0.0/16"), "{}", msg);
    }

    #[test]
    fn test_exact_fit_address_space() {
        // 64 links of /31 fill a /25 exactly
        let params = FabricParameters { base_prefix: "10.0.0.0/25".to_string(), ..spine_fabric() };
        assert!(params.validate().is_ok());

        let params = FabricParameters { base_prefix: "10.0.0.0/26".to_string(), ..spine_fabric() };
        expect_capacity(params);
    }

    #[test]
    fn test_malformed_base_prefix() {
        for prefix in ["192.168.0.0", "192.168.0.0/abc", "300.1/16", "10.0.0.0/40"] {
            let msg = expect_configuration(FabricParameters { base_prefix: prefix.to_string(), ..spine_fabric() });
            assert!(msg.contains("base prefix"), "{}", msg);
        }
    }

    #[test]
    fn test_check_order_capacity_after_configuration() {
        // Too many spines and a bad mask: the mask is checked first
        let params = FabricParameters { spine_count: Some(8), p2p_mask: 16, ..spine_fabric() };
        assert!(expect_configuration(params).contains("p2p mask"));

        // Port minimums are checked before speed symmetry
        let params = FabricParameters { spine_ports: 2, leaf_up_speed: 10, ..spine_fabric() };
        assert!(expect_configuration(params).contains("spine ports"));
    }

    #[test]
    fn test_summary_from_cli_style_input() {
        let fabric = spine_fabric().validate().unwrap();
        let summary = FabricSummary::from_validated(&fabric).unwrap();
        assert_eq!(summary.p2p_links, 64);
        assert_eq!(summary.p2p_subnets_available, 32_768);
        assert_eq!(summary.p2p_first_subnet, "192.168.0.0");
        assert_eq!(summary.first_asn, 64512);
        assert_eq!(summary.last_asn, 64531);
    }
}
