use crate::scraper::search::{SearchRequest, Segment, PAGE_PARAM};

#[test]
fn url_keeps_filter_order_and_values() {
    let search = SearchRequest::new(
        Segment::Achat,
        [("idtypebien", "1,2"), ("cp", "75"), ("tri", "d_dt_crea")],
    );

    assert_eq!(
        search.url(),
        "http://www.seloger.com/list.htm?idtt=2&idtypebien=1,2&cp=75&tri=d_dt_crea"
    );
}

#[test]
fn segment_codes() {
    let codes: Vec<(Segment, u8)> = [
        Segment::Location,
        Segment::Achat,
        Segment::LocationTemporaire,
        Segment::LocationVacances,
        Segment::Viager,
        Segment::Investissement,
    ]
    .into_iter()
    .map(|s| (s, s.code()))
    .collect();

    assert_eq!(
        codes,
        vec![
            (Segment::Location, 1),
            (Segment::Achat, 2),
            (Segment::LocationTemporaire, 3),
            (Segment::LocationVacances, 4),
            (Segment::Viager, 5),
            (Segment::Investissement, 6),
        ]
    );
}

#[test]
fn sold_listings_use_their_own_host() {
    let search = SearchRequest::new(Segment::BiensVendus, [("cp", "33")]);

    assert_eq!(
        search.url(),
        "http://biens-vendus.seloger.com/list.htm?idtt=4&cp=33"
    );
}

#[test]
fn no_filters() {
    let search = SearchRequest::new(Segment::Location, Vec::<(String, String)>::new());
    assert_eq!(search.url(), "http://www.seloger.com/list.htm?idtt=1");
}

#[test]
fn page_urls() {
    let search = SearchRequest::new(Segment::Achat, [("cp", "75")]);

    assert_eq!(search.page_url(1), search.url());
    assert_eq!(
        search.page_url(3),
        format!("http://www.seloger.com/list.htm?idtt=2&cp=75&{PAGE_PARAM}=3")
    );
}

#[test]
fn host_override() {
    let plain = SearchRequest::new(Segment::Achat, [("cp", "75")]).with_host("127.0.0.1:8080");
    assert_eq!(plain.url(), "http://127.0.0.1:8080/list.htm?idtt=2&cp=75");

    let with_scheme =
        SearchRequest::new(Segment::Achat, [("cp", "75")]).with_host("https://mirror.test/");
    assert_eq!(with_scheme.url(), "https://mirror.test/list.htm?idtt=2&cp=75");
}

#[test]
fn parsed_url_validates_host() {
    let search = SearchRequest::new(Segment::Achat, [("cp", "75")]);
    let url = search.parsed_url().expect("valid url");
    assert_eq!(url.host_str(), Some("www.seloger.com"));

    let broken = search.with_host("bad host");
    assert!(broken.parsed_url().is_err());
}
