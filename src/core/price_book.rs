use crate::domain::model::CatalogItem;
use crate::utils::money::format_yen;

struct PriceEntry {
    product_name: &'static str,
    original_name: &'static str,
    price: f64,
}

const PRICE_BOOK: &[PriceEntry] = &[
    PriceEntry {
        product_name: "Torani Salsa De Chocolate Y Mocha 1890ml",
        original_name: "東洋ベバレッジ トラーニ チョコレートモカソース 1890ml",
        price: 6696.0,
    },
    PriceEntry {
        product_name: "Torani Saborizante Chocolate Puro Hecho Sin Azúcar 750ml",
        original_name: "トラーニ ピュアメイド ゼロシュガー チョコレート 750ml",
        price: 3321.0,
    },
    PriceEntry {
        product_name: "Torani Salsa De Caramelo 1890ml",
        original_name: "東洋ベバレッジ トラーニ キャラメルソース 1890ml",
        price: 7560.0,
    },
    PriceEntry {
        product_name: "Torani Saborizante De Caramelo Torani 750ml",
        original_name: "トラーニ キャラメル 750ml フレーバー シロップ Torani Caramel Syrup 750ml",
        price: 4543.0,
    },
    PriceEntry {
        product_name: "Torani Saborizante Crema Irlandesa 750ml",
        original_name: "トラーニ torani フレーバーシロップ アイリッシュクリーム 750ml 1本 flavored syrop 東洋ベバレッジ",
        price: 3164.0,
    },
    PriceEntry {
        product_name: "Torani Saborizante Cero Azúcar Vainilla 750ml",
        original_name: "トラーニ ピュアメイド シロップ ゼロシュガー バニラ 750ml",
        price: 3264.0,
    },
    PriceEntry {
        product_name: "Prana Chai 1kg",
        original_name: "プラナチャイ 1kG",
        price: 8195.0,
    },
    PriceEntry {
        product_name: "Mita Beverage Sirope Matcha Paquete de Papel 1L",
        original_name: "三田飲料 抹茶ｼﾛｯﾌﾟ 紙ﾊﾟｯｸ 1L",
        price: 1804.0,
    },
    PriceEntry {
        product_name: "Torani Sirope De Canela 750ml Sirope De Sabor Torani Sirope De Canela 750ml",
        original_name: "トラーニ シナモン 750ml フレーバー シロップ Torani Cinnamon Syrup 750ml",
        price: 4543.0,
    },
    PriceEntry {
        product_name: "Bomba dosificadora exclusiva Torani",
        original_name: "トラーニ 専用ディスペンサー ポンプ",
        price: 1323.0,
    },
    PriceEntry {
        product_name: "La Perruche Azúcar moreno 2,5 kg (envuelto individualmente) Café francés Azúcar en cubos Café Azúcar La Perruche",
        original_name: "［ラ・ペルーシュ］ ブラウンシュガー 2.5kg（個包装） フランス産 コーヒー 角砂糖 カフェシュガー La Perruche",
        price: 9423.0,
    },
    PriceEntry {
        product_name: "Servilletas comerciales de origami de 6 pliegues, forma de montaña, blanco liso, 1000 hojas",
        original_name: "業務用 6つ折り紙ナプキン 山型 白無地 1000枚入",
        price: 1432.0,
    },
    PriceEntry {
        product_name: "Pajitas flexibles, sin embalaje individual, negras, 500 unidades",
        original_name: "フレックス ストロー 個別包装なし ブラック 500本入り",
        price: 1739.0,
    },
    PriceEntry {
        product_name: "President Spray Whip 250g (1 botella)",
        original_name: "プレジデント スプレーホイップ 250g (1本)",
        price: 1349.0,
    },
    PriceEntry {
        product_name: "Salsa Torani De Chocolate Y Moca Pura Elaborada 468g",
        original_name: "トラーニ チョコレート モカソース ピュアメイド 468g",
        price: 4003.0,
    },
];

/// Looks a product up in the reference price list: exact (case-insensitive)
/// match on either name first, then containment in either direction.
/// Empty names never match.
pub fn find_price(product_name: &str, original_name: &str) -> Option<f64> {
    let name = product_name.trim().to_lowercase();
    let original = original_name.trim().to_lowercase();

    let exact = PRICE_BOOK.iter().find(|p| {
        (!name.is_empty() && p.product_name.to_lowercase() == name)
            || (!original.is_empty() && p.original_name.to_lowercase() == original)
    });
    if let Some(entry) = exact {
        return Some(entry.price);
    }

    PRICE_BOOK
        .iter()
        .find(|p| {
            let book_name = p.product_name.to_lowercase();
            let book_original = p.original_name.to_lowercase();
            (!name.is_empty() && (name.contains(&book_name) || book_name.contains(&name)))
                || (!original.is_empty()
                    && (original.contains(&book_original) || book_original.contains(&original)))
        })
        .map(|p| p.price)
}

/// Fills in price for rows whose parsed price is zero. Returns how many
/// rows were updated.
pub fn backfill_prices(catalog: &mut [CatalogItem]) -> usize {
    let mut updated = 0;
    for item in catalog.iter_mut().filter(|i| i.price_value == 0.0) {
        if let Some(price) = find_price(&item.product_name, &item.original_name) {
            item.price_value = price;
            item.current_price = format_yen(price);
            updated += 1;
        }
    }
    updated
}
