//! Integration test: shop floor operations
//!
//! Exercises stocking, removal, price updates, and sale processing through
//! the public ShopManager API, plus the event stream and the market's
//! reaction to a run of sales.

use gildhall::items::generation::generate_ware;
use gildhall::items::{Quality, Ware, WareKind};
use gildhall::market::{PricingConfig, Satisfaction};
use gildhall::shop::{ShopEvent, ShopManager};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use uuid::Uuid;

fn test_shop(slots: usize) -> ShopManager {
    ShopManager::new(slots, 500.0, PricingConfig::default())
}

fn ware(name: &str, quality: Quality) -> Ware {
    Ware::new(name.to_string(), WareKind::Weapon, quality, 45.0, 0.3)
}

#[test]
fn test_stock_remove_restores_available_slots() {
    let shop = test_shop(6);
    let before = shop.available_slots();

    let blade = ware("Tempered Blade", Quality::Rare);
    assert!(shop.stock_item(2, &blade, 90.0));
    assert_eq!(shop.available_slots(), before - 1);

    let returned = shop.remove_item(2).expect("stocked ware comes back");
    assert_eq!(returned.id, blade.id);
    assert_eq!(shop.available_slots(), before);
}

#[test]
fn test_zero_priced_stock_leaves_display_untouched() {
    let shop = test_shop(4);
    assert!(!shop.stock_item(0, &ware("Freebie", Quality::Common), 0.0));
    assert_eq!(shop.items_on_display(), 0);
    assert!(shop.displayed_wares().is_empty());
}

#[test]
fn test_sale_moves_value_through_the_whole_shop() {
    let shop = test_shop(4);
    let gold_before = shop.gold();

    let blade = ware("Runed Blade", Quality::Rare);
    shop.stock_item(0, &blade, 110.0);

    let buyer = Uuid::new_v4();
    let tx = shop
        .process_sale(0, buyer, 110.0, Satisfaction::Pleased)
        .expect("occupied slot sells");

    assert_eq!(shop.gold(), gold_before + 110.0);
    assert_eq!(shop.items_on_display(), 0);
    assert_eq!(shop.transaction_count(), 1);
    assert_eq!(tx.customer_id, buyer);
    assert!(tx.profit() > 0.0);
    assert!((shop.total_revenue() - 110.0).abs() < 1e-9);

    // Market segment saw the sale.
    let market = shop
        .market_snapshot(WareKind::Weapon, Quality::Rare)
        .expect("sale creates the segment");
    assert_eq!(market.recent_sales_count, 1);
    assert!(market.demand_level > 1.0);
}

#[test]
fn test_double_sale_of_one_slot_fails_cleanly() {
    let shop = test_shop(2);
    shop.stock_item(0, &ware("Single Axe", Quality::Uncommon), 60.0);

    assert!(shop
        .process_sale(0, Uuid::new_v4(), 60.0, Satisfaction::Neutral)
        .is_some());
    assert!(shop
        .process_sale(0, Uuid::new_v4(), 60.0, Satisfaction::Neutral)
        .is_none());

    assert_eq!(shop.transaction_count(), 1);
}

#[test]
fn test_event_stream_reports_operations_in_order() {
    let shop = test_shop(2);
    let mut events = shop.subscribe();

    let axe = ware("Watched Axe", Quality::Common);
    shop.stock_item(1, &axe, 50.0);
    shop.update_price(1, 55.0);
    shop.remove_item(1);

    assert!(matches!(
        events.try_recv().unwrap(),
        ShopEvent::ItemStocked { slot_id: 1, .. }
    ));
    assert!(matches!(
        events.try_recv().unwrap(),
        ShopEvent::PriceUpdated { slot_id: 1, .. }
    ));
    assert!(matches!(
        events.try_recv().unwrap(),
        ShopEvent::ItemRemoved { slot_id: 1, .. }
    ));
    assert!(events.try_recv().is_err());
}

#[test]
fn test_engine_prices_rise_with_quality_through_shop() {
    let shop = test_shop(8);
    let mut rng = ChaCha8Rng::seed_from_u64(17);

    let mut last = 0.0;
    for quality in Quality::ALL {
        let item = ware("Graded Blade", quality);
        let price = shop.price_ware(&item, &mut rng);
        assert!(
            price >= last,
            "{:?} priced {} under previous tier {}",
            quality,
            price,
            last
        );
        last = price;
    }
}

#[test]
fn test_sustained_overpricing_draws_competitors_upward() {
    let shop = test_shop(4);
    let mut rng = ChaCha8Rng::seed_from_u64(23);

    // Sell the same segment far above appraised value repeatedly.
    for i in 0..6 {
        let item = generate_ware(WareKind::Jewelry, Quality::Epic, &mut rng);
        let gouged = item.appraised_value() * 1.5;
        shop.stock_item(i % 4, &item, gouged);
        shop.process_sale(i % 4, Uuid::new_v4(), gouged, Satisfaction::Disappointed);
    }

    let market = shop
        .market_snapshot(WareKind::Jewelry, Quality::Epic)
        .unwrap();
    assert!(market.competitor_price_multiplier > 1.0);
    assert!(market.competitor_price_multiplier <= 1.5);
    assert_eq!(market.recent_sales_count, 6);
}

#[test]
fn test_market_cools_off_over_idle_days() {
    let shop = test_shop(2);
    let item = ware("Hot Blade", Quality::Uncommon);
    for _ in 0..5 {
        shop.stock_item(0, &item, 80.0);
        shop.process_sale(0, Uuid::new_v4(), 80.0, Satisfaction::Pleased);
    }

    let hot = shop
        .market_snapshot(WareKind::Weapon, Quality::Uncommon)
        .unwrap()
        .demand_level;

    shop.update_market(72.0);

    let cooled = shop
        .market_snapshot(WareKind::Weapon, Quality::Uncommon)
        .unwrap()
        .demand_level;
    assert!(cooled < hot);
    assert!((cooled - 1.0).abs() < 0.1);
}
