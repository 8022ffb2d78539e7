use approx::assert_relative_eq;
use clearwater_core::dataset::Value;
use clearwater_core::errors::ClearwaterError;
use clearwater_core::variable::Usage;
use clearwater_modules::nsm1::{Nsm1Config, NutrientBudget, DEFAULT_INITIAL_STATE};
use ndarray::s;

fn initial_state(overrides: &[(&'static str, f64)]) -> Vec<(&'static str, Value)> {
    DEFAULT_INITIAL_STATE
        .iter()
        .map(|&(name, value)| {
            let value = overrides
                .iter()
                .find(|(candidate, _)| *candidate == name)
                .map_or(value, |(_, value)| *value);
            (name, Value::from(value))
        })
        .collect()
}

fn cbod_after_one_step(config: &Nsm1Config, overrides: &[(&'static str, f64)]) -> f64 {
    let mut budget = NutrientBudget::new(config, initial_state(overrides), 1).unwrap();
    budget.run().unwrap();
    budget.latest("CBOD").unwrap()[0]
}

#[test]
fn cbod_reference_conditions() {
    let config = Nsm1Config::default();
    let cbod = cbod_after_one_step(&config, &[("CBOD", 1.0), ("DOX", 8.0)]);
    assert_relative_eq!(cbod, 0.858, max_relative = 0.01);
}

#[test]
fn cbod_oxidation_is_oxygen_limited() {
    let config = Nsm1Config::default();
    let cbod = cbod_after_one_step(&config, &[("CBOD", 1.0), ("DOX", 1.0)]);
    assert_relative_eq!(cbod, 0.899, max_relative = 0.01);
}

#[test]
fn cbod_scales_with_concentration() {
    let config = Nsm1Config::default();
    let cbod = cbod_after_one_step(&config, &[("CBOD", 5.0), ("DOX", 8.0)]);
    assert_relative_eq!(cbod, 4.29, max_relative = 0.01);
}

#[test]
fn cbod_in_cold_water() {
    let mut config = Nsm1Config::default();
    config.global_vars.twater_c = 15.0;
    let cbod = cbod_after_one_step(&config, &[("CBOD", 1.0), ("DOX", 8.0)]);
    assert_relative_eq!(cbod, 0.910, max_relative = 0.01);
}

#[test]
fn cbod_with_fast_oxidation() {
    let mut config = Nsm1Config::default();
    config.cbod.kbod_20 = 1.0;
    let cbod = cbod_after_one_step(&config, &[("CBOD", 1.0), ("DOX", 8.0)]);
    // A one day explicit step overshoots below zero
    assert_relative_eq!(cbod, -0.184, max_relative = 0.01);
}

#[test]
fn cbod_with_sedimentation() {
    let mut config = Nsm1Config::default();
    config.cbod.ksbod_20 = 1.0;
    let cbod = cbod_after_one_step(&config, &[("CBOD", 1.0), ("DOX", 8.0)]);
    assert_relative_eq!(cbod, -0.400, max_relative = 0.01);
}

#[test]
fn cbod_with_higher_half_saturation() {
    let mut config = Nsm1Config::default();
    config.cbod.ks_ox_bod = 1.0;
    let cbod = cbod_after_one_step(&config, &[("CBOD", 1.0), ("DOX", 8.0)]);
    assert_relative_eq!(cbod, 0.866, max_relative = 0.01);
}

#[test]
fn cbod_without_oxygen_limitation() {
    let mut config = Nsm1Config::default();
    config.global_parameters.use_dox = false;
    let cbod = cbod_after_one_step(&config, &[("CBOD", 1.0), ("DOX", 8.0)]);
    assert_relative_eq!(cbod, 0.849, max_relative = 0.01);

    // DOX is still carried as a state but no longer changes
    let mut budget = NutrientBudget::new(&config, DEFAULT_INITIAL_STATE, 1).unwrap();
    budget.run().unwrap();
    assert_eq!(budget.latest("DOX").unwrap()[0], 8.0);
    assert!(!budget.is_active("DOX_reaeration"));
    assert_eq!(budget.usage("dDOXdt"), Some(Usage::Static));
}

#[test]
fn every_subsystem_can_be_disabled() {
    let switches: [(&str, fn(&mut Nsm1Config)); 15] = [
        ("use_NH4", |c| c.global_parameters.use_nh4 = false),
        ("use_NO3", |c| c.global_parameters.use_no3 = false),
        ("use_OrgN", |c| c.global_parameters.use_org_n = false),
        ("use_OrgP", |c| c.global_parameters.use_org_p = false),
        ("use_TIP", |c| c.global_parameters.use_tip = false),
        ("use_DOX", |c| c.global_parameters.use_dox = false),
        ("use_Algae", |c| c.global_parameters.use_algae = false),
        ("use_Balgae", |c| c.global_parameters.use_balgae = false),
        ("use_POC", |c| c.global_parameters.use_poc = false),
        ("use_DOC", |c| c.global_parameters.use_doc = false),
        ("use_DIC", |c| c.global_parameters.use_dic = false),
        ("use_N2", |c| c.global_parameters.use_n2 = false),
        ("use_Pathogen", |c| c.global_parameters.use_pathogen = false),
        ("use_Alk", |c| c.global_parameters.use_alk = false),
        ("use_POM", |c| c.global_parameters.use_pom = false),
    ];

    for (toggle, disable) in switches {
        let mut config = Nsm1Config::default();
        disable(&mut config);

        let mut budget = NutrientBudget::new(&config, DEFAULT_INITIAL_STATE, 1)
            .unwrap_or_else(|e| panic!("building without {toggle} failed: {e}"));
        budget
            .run()
            .unwrap_or_else(|e| panic!("stepping without {toggle} failed: {e}"));

        for (name, _) in DEFAULT_INITIAL_STATE {
            let value = budget.latest(name).unwrap()[0];
            assert!(value.is_finite(), "{name} is not finite without {toggle}");
        }
    }
}

#[test]
fn disabled_subsystem_keeps_its_state_constant() {
    let mut config = Nsm1Config::default();
    config.global_parameters.use_pathogen = false;
    config.global_parameters.use_alk = false;

    let mut budget = NutrientBudget::new(&config, DEFAULT_INITIAL_STATE, 2).unwrap();
    budget.run().unwrap();

    let px = budget.history("PX").unwrap();
    assert_eq!(px.slice(s![0, ..]).to_vec(), vec![1.0, 1.0, 1.0]);
    let alk = budget.history("Alk").unwrap();
    assert_eq!(alk.slice(s![0, ..]).to_vec(), vec![1.0, 1.0, 1.0]);

    for pruned in ["PX_death", "PX_solar", "PX_settling", "Alk_nitrification"] {
        assert!(budget.pruned().iter().any(|name| name == pruned));
        assert!(budget.read(pruned, 0).is_err());
    }
}

#[test]
fn cross_subsystem_fluxes_fall_back_to_zero() {
    let mut config = Nsm1Config::default();
    config.global_parameters.use_algae = false;

    let mut budget = NutrientBudget::new(&config, DEFAULT_INITIAL_STATE, 1).unwrap();
    budget.run().unwrap();

    assert_eq!(budget.read("ApGrowth", 1).unwrap()[0], 0.0);
    assert_eq!(budget.latest("Ap").unwrap()[0], 36.77);
    // Nitrogen is still computed without algal uptake
    assert!(budget.is_active("dNH4dt"));
    assert!(budget.latest("NH4").unwrap()[0].is_finite());
}

#[test]
fn first_timestep_has_no_dynamics() {
    let budget = NutrientBudget::new(&Nsm1Config::default(), DEFAULT_INITIAL_STATE, 1).unwrap();

    assert_eq!(budget.current_timestep(), 0);
    assert_eq!(budget.dataset().time_dim(), "nsm1_time_step");
    assert_eq!(budget.read("CBOD", 0).unwrap()[0], 1.0);
    assert_eq!(budget.read("kbod_20", 0).unwrap()[0], 0.12);
    assert!(budget.read("CBOD_oxidation", 0).unwrap()[0].is_nan());
}

#[test]
fn locations_are_independent() {
    let mut state = initial_state(&[]);
    for (name, value) in state.iter_mut() {
        match *name {
            "CBOD" => *value = Value::from(vec![1.0, 5.0]),
            "DOX" => *value = Value::from(vec![8.0, 8.0]),
            _ => {}
        }
    }

    let mut budget = NutrientBudget::new(&Nsm1Config::default(), state, 1).unwrap();
    assert_eq!(budget.dataset().locations(), 2);
    budget.run().unwrap();

    let cbod = budget.latest("CBOD").unwrap();
    assert_relative_eq!(cbod[0], 0.858, max_relative = 0.01);
    assert_relative_eq!(cbod[1], 4.29, max_relative = 0.01);
    // Scalar initial values are broadcast to every location
    let ap = budget.latest("Ap").unwrap();
    assert_relative_eq!(ap[0], ap[1]);
}

#[test]
fn mismatched_locations_are_rejected() {
    let mut state = initial_state(&[]);
    for (name, value) in state.iter_mut() {
        match *name {
            "CBOD" => *value = Value::from(vec![1.0, 5.0]),
            "DOX" => *value = Value::from(vec![8.0, 8.0, 8.0]),
            _ => {}
        }
    }

    let result = NutrientBudget::new(&Nsm1Config::default(), state, 1);
    assert!(matches!(
        result,
        Err(ClearwaterError::ShapeMismatch { ref variable, .. }) if variable == "CBOD"
    ));
}

#[test]
fn missing_state_is_reported() {
    let state: Vec<_> = DEFAULT_INITIAL_STATE
        .into_iter()
        .filter(|(name, _)| *name != "DOX")
        .collect();

    let result = NutrientBudget::new(&Nsm1Config::default(), state, 1);
    assert_eq!(
        result.unwrap_err(),
        ClearwaterError::MissingInitialValue("DOX".to_string())
    );
}

#[test]
fn configuration_from_toml() {
    let config = Nsm1Config::from_toml_str(
        r#"
        [cbod]
        kbod_20 = 1.0

        [global_parameters]
        use_pathogen = false
        "#,
    )
    .unwrap();

    let budget = NutrientBudget::new(&config, DEFAULT_INITIAL_STATE, 1).unwrap();
    assert_eq!(budget.read("kbod_20", 0).unwrap()[0], 1.0);
    assert!(!budget.is_active("PX_death"));
}
