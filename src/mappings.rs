//! Static lookup data for stats.dmp decoding.
//!
//! Heap item tables are indexed by the position of a counter inside a heap
//! array, so their order must match the game's type lists exactly.

/// A family of per-slot heap tags, e.g. `UNB0`..`UNB7` for units bought.
#[derive(Debug, PartialEq, Eq)]
pub struct CountableHeap {
    pub code: &'static str,
    pub name: &'static str,
    /// Key used for the player's count totals and `detailed_counts`.
    pub key: &'static str,
}

impl CountableHeap {
    const fn new(code: &'static str, name: &'static str, key: &'static str) -> Self {
        Self { code, name, key }
    }

    /// Category code selecting the item table; the trailing
    /// bought/killed/left/captured letter is dropped.
    pub fn category(&self) -> &'static str {
        let code: &'static str = self.code;
        &code[..2]
    }
}

pub static COUNTABLE_HEAPS: [CountableHeap; 17] = [
    CountableHeap::new("UNB", "Units Bought", "units_bought"),
    CountableHeap::new("INB", "Infantry Bought", "infantry_bought"),
    CountableHeap::new("PLB", "Planes Bought", "planes_bought"),
    CountableHeap::new("VSB", "Ships Built", "ships_built"),
    CountableHeap::new("BLB", "Buildings Bought", "buildings_bought"),
    CountableHeap::new("UNK", "Units Killed", "units_killed"),
    CountableHeap::new("INK", "Infantry Killed", "infantry_killed"),
    CountableHeap::new("PLK", "Planes Killed", "planes_killed"),
    CountableHeap::new("VSK", "Ships Killed", "ships_killed"),
    CountableHeap::new("BLK", "Buildings Killed", "buildings_killed"),
    CountableHeap::new("BLC", "Buildings Captured", "buildings_captured"),
    CountableHeap::new("UNL", "Units Left", "units_left"),
    CountableHeap::new("INL", "Infantry Left", "infantry_left"),
    CountableHeap::new("PLL", "Planes Left", "planes_left"),
    CountableHeap::new("BLL", "Buildings Left", "buildings_left"),
    CountableHeap::new("VSL", "Ships Left", "ships_left"),
    CountableHeap::new("CRA", "Crates Found", "crates_found"),
];

pub fn find_heap(code: &str) -> Option<&'static CountableHeap> {
    COUNTABLE_HEAPS.iter().find(|heap| heap.code == code)
}

pub static SIDES: [&str; 10] = [
    "America",
    "Korea",
    "France",
    "Germany",
    "Great Britain",
    "Libya",
    "Iraq",
    "Cuba",
    "Russia",
    "Yuri",
];

pub fn side_name(index: u32) -> Option<&'static str> {
    usize::try_from(index)
        .ok()
        .and_then(|index| SIDES.get(index))
        .copied()
}

/// Item names for a heap category. `VS` has no table.
pub fn category_items(category: &str) -> Option<&'static [&'static str]> {
    match category {
        "CR" => Some(&CRATE_TYPES),
        "IN" => Some(&INFANTRY_TYPES),
        "UN" => Some(&UNIT_TYPES),
        "PL" => Some(&PLANE_TYPES),
        "BL" => Some(&BUILDING_TYPES),
        _ => None,
    }
}

pub static CRATE_TYPES: [&str; 19] = [
    "Armor", "Firepower", "HealBase", "Money", "Reveal", "Speed", "Veteran", "Unit",
    "Invulnerability", "IonStorm", "Gas", "Tiberium", "Pod", "Cloak", "Darkness", "Explosion",
    "ICBM", "Napalm", "Squad",
];

pub static INFANTRY_TYPES: [&str; 65] = [
    "E1", "E2", "SHK", "ENGINEER", "JUMPJET", "GHOST", "YURI", "IVAN", "DESO", "DOG", "CIV1",
    "CIV2", "CIV3", "CTECH", "WEEDGUY", "CLEG", "SPY", "CCOMAND", "PTROOP", "CIVAN", "YURIPR",
    "SNIPE", "COW", "ALL", "TANY", "FLAKT", "TERROR", "SENGINEER", "ADOG", "VLADIMIR", "PENTGEN",
    "PRES", "SSRV", "CIVA", "CIVB", "CIVC", "CIVBBP", "CIVBFM", "CIVBF", "CIVBTM", "CIVSFM",
    "CIVSF", "CIVSTM", "POLARB", "JOSH", "YENGINEER", "GGI", "INIT", "BORIS", "BRUTE", "VIRUS",
    "CLNT", "ARND", "STLN", "CAML", "EINS", "MUMY", "RMNV", "LUNR", "DNOA", "DNOB", "SLAV", "WWLF",
    "YDOG", "YADOG",
];

pub static UNIT_TYPES: [&str; 82] = [
    "AMCV", "HARV", "APOC", "HTNK", "SAPC", "CAR", "BUS", "WINI", "PICK", "MTNK", "HORV", "TRUCKA",
    "TRUCKB", "CARRIER", "V3", "ZEP", "DRON", "HTK", "DEST", "SUB", "AEGIS", "LCRF", "DRED", "SHAD",
    "SQD", "DLPH", "SMCV", "TNKD", "HOWI", "TTNK", "HIND", "LTNK", "CMON", "CMIN", "SREF", "XCOMET",
    "HYD", "MGTK", "FV", "DeathDummy", "VLAD", "DTRUCK", "PROPA", "CONA", "COP", "EUROC", "LIMO",
    "STANG", "SUVB", "SUVW", "TAXI", "PTRUCK", "CRUISE", "TUG", "CDEST", "YHVR", "PCV", "SMIN",
    "SMON", "YCAB", "YTNK", "BFRT", "TELE", "CAOS", "DDBX", "BCAB", "BSUB", "SCHP", "JEEP", "MIND",
    "DISK", "UTNK", "ROBO", "YDUM", "SCHD", "DOLY", "CBLC", "FTRK", "AMBU", "CIVP", "VISC_LRG",
    "VISC_SML",
];

pub static PLANE_TYPES: [&str; 12] = [
    "APACHE", "ORCA", "HORNET", "V3ROCKET", "ASW", "DMISL", "PDPLANE", "BEAG", "CARGOPLANE", "BPLN",
    "SPYP", "CMISL",
];

pub static BUILDING_TYPES: [&str; 402] = [
    "GAPOWR", "GAREFN", "GACNST", "GAPILE", "GASAND", "GADEPT", "GATECH", "GAWEAP", "CALAB",
    "NAPOWR", "NATECH", "NAHAND", "GAWALL", "NARADR", "NAWEAP", "NAREFN", "NAWALL", "CAHSE07",
    "NAPSIS", "CASYDN01", "NALASR", "NASAM", "CASYDN02", "GAYARD", "NAIRON", "NACNST", "NADEPT",
    "GACSPH", "GADUMY", "GAWEAT", "CABHUT", "GALITE", "REDLAMP", "GRENLAMP", "BLUELAMP", "YELWLAMP",
    "PURPLAMP", "INORANLAMP", "INGRNLMP", "INREDLMP", "INBLULMP", "CITY01", "CITY02", "CITY03",
    "CITY04", "CITY05", "CITY06", "CAHOSP", "INGALITE", "INYELWLAMP", "INPURPLAMP", "NEGLAMP",
    "NEGRED", "TESLA", "NAMISL", "ATESLA", "CAMACH", "TSTLAMP", "CASYDN03", "AMMOCRAT", "GAGREEN",
    "NAYARD", "GASPYSAT", "GAGAP", "GTGCAN", "NANRCT", "GAPILL", "NAFLAK", "CAOUTP", "CATHOSP",
    "CAAIRP", "CAOILD", "NACLON", "GAOREP", "CACITY01", "CACITY02", "CACITY03", "CACITY04",
    "CANEWY01", "CANEWY04", "CANEWY05", "CASWST01", "CATECH01", "CATEXS01", "CATEXS02", "CAWASH01",
    "CAFARM01", "CAFARM02", "CALIT01E", "CALIT01N", "CALIT01S", "CALIT01W", "CAMISC01", "CAMISC02",
    "CAMISC03", "CAMISC04", "CAPOL01E", "CAPOL01N", "CAPOL01S", "CAPOL01W", "CASIN01E", "CASIN01N",
    "CASIN01S", "CASIN01W", "CAPARS01", "GAAIRC", "CAFRMA", "CAFRMB", "CAWASH05", "CAWASH04",
    "CAWASH03", "CAWASH07", "CAWASH11", "CAWSH12", "CAWASH14", "CAWASH09", "CAWASH10", "CAWASH13",
    "CAARMY01", "CAUSFGL", "CAWASH08", "CALIT03E", "CALIT03N", "CALIT03S", "CALIT03W", "CALIT02L",
    "CALIT02R", "CAHSE01", "CAWT01", "CATS01", "CABARN02", "CAWA2A", "CAWA2B", "CAWA2C", "CAWA2D",
    "AMRADR", "CAPRS03", "CAGARD01", "CARUS01", "CAMIAM01", "CATRAN01", "CAMIAM02", "CANWY05",
    "MAYAN", "CAEUR1", "CAEUR2", "CAEUR04", "CAMEX01", "CARUS02A", "CARUS02B", "CARUS02C",
    "CARUS02D", "CARUS02E", "CARUS02F", "CANEWY06", "CANEWY07", "CANEWY08", "CAPARS02", "CAPARS08",
    "CAPARS09", "CARUS03", "CANEWY10", "CANEWY11", "CANEWY12", "CANEWY13", "CANEWY14", "CANEWY15",
    "CANEWY16", "CANEWY17", "CANEWY18", "CAPARS04", "CAPARS05", "CAPARS06", "CAPARS07", "CAWASH15",
    "CAPARS10", "CAPARS13", "CAPARS14", "CAGAS01", "CAPARS11", "CAPARS12", "CAFARM06", "CAMIAM04",
    "NAPSYB", "NAPSYA", "CAIND01", "CACOLO01", "CANWY09", "CANWY22", "CANWY23", "CANWY24",
    "CANWY25", "CANWY26", "CATEXS03", "CATEXS04", "CATEXS05", "CARUS02G", "CACHIG04", "CAMIAM03",
    "CARUS07", "CATEXS06", "CATEXS07", "CATEXS08", "CACHIG01", "CACHIG02", "CACHIG03", "CAWASH16",
    "CAWASH17", "CACHIG05", "CAWASH19", "CARUS08", "CARUS09", "CARUS10", "CARUS11", "CANEWY20",
    "CANEWY21", "CARUS04", "CARUS05", "CARUS06", "CAMSC01", "CAMSC02", "CAMSC03", "CAMSC04",
    "CAMSC05", "CAMSC06", "CAMSC07", "CAWASH18", "CAEURO05", "CAPARK01", "CAPARK02", "CAPARK03",
    "CAHSE02", "CAHSE03", "CAHSE04", "CASTRT01", "CASTRT02", "CASTL01", "CASTL02", "CASTL03",
    "CASTL04", "CAHSE05", "CAHSE06", "CAMIAM05", "CAMIAM06", "CAMIAM07", "CAFNCB", "CAFNCW",
    "CAMEX02", "CAMEX03", "CAMEX04", "CAMEX05", "CACHIG06", "CAMSC08", "CAMSC09", "CAARMY02",
    "CAARMY03", "CAARMY04", "TEMMORLAMP", "TEMDAYLAMP", "TEMDUSLAMP", "TEMNITLAMP", "SNOMORLAMP",
    "SNODAYLAMP", "SNODUSLAMP", "SNONITLAMP", "CAKRMW", "CARUFGL", "CAFRFGL", "CATRAN02", "CACUFGL",
    "CASKFGL", "CALBFGL", "CAMIAM08", "CAMISC05", "CAMISC06", "CASTL05A", "CASTL05B", "CASTL05C",
    "CASTL05D", "CASTL05E", "CASTL05F", "CASTL05G", "CASTL05H", "CAMSC10", "CAGEFGL", "CAUKFGL",
    "CAWASH06", "CAMSC11", "CAMSC12", "CAMSC13", "CAPOFGL", "CAMSC12A", "CAMOV01", "CAMOV02",
    "CABUNK01", "CABUNK02", "CAFNCP", "CASTRT03", "CASTRT04", "CASTRT05", "YACNST", "YAPOWR",
    "YABRCK", "YAWEAP", "YAYARD", "YADEPT", "YATECH", "GAFWLL", "YAGGUN", "YAPSYT", "NAINDP",
    "YAGRND", "YAGNTC", "CASLAB", "CATIME", "YAPPET", "CALOND04", "CALOND05", "CALOND06",
    "CAMOON01", "CATRAN03", "CAEAST01", "CAEGYP01", "CAEGYP02", "CAEGYP03", "CALA01", "CALA02",
    "CALA03", "CALA04", "CALA05", "CALOND01", "CALOND02", "CALOND03", "CAMORR01", "CAMORR02",
    "CAMORR03", "CASANF01", "CASANF02", "CASANF03", "CASANF04", "CASANF05", "CASEAT01", "NATBNK",
    "GAGATE_A", "CASANF09", "CASANF10", "CASANF11", "CASANF12", "CASANF13", "CASANF14", "CASANF06",
    "CASANF07", "CASANF08", "CASEAT02", "YACOMD", "YAPPPT", "GAROBO", "YAREFN", "YAROCK", "NABNKR",
    "CASANF15", "CASANF16", "CASANF17", "CASANF18", "CASIN03E", "CASIN03S", "CAURB01", "CAURB02",
    "CAURB03", "CAPOWR", "CALA07", "CAEGYP06", "CALA08", "CAEAST02", "CABARR01", "CABARR02",
    "CAMORR04", "CAMORR05", "CALA09", "CAEGYP04", "CAEGYP05", "CALA06", "CAMORR06", "CAMORR07",
    "CAMORR08", "CAMORR09", "CAMORR10", "CATIME01", "CATIME02", "CALA10", "CALA11", "CALA12",
    "CALA13", "CAPARK04", "CAPARK05", "CAPARK06", "CALA14", "CALA15", "CABUNK03", "CABUNK04",
    "CALUNR01", "CALUNR02",
];
